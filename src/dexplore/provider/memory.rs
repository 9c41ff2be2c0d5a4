use super::{without_sentinels, DataProvider};
use crate::error::{DexError, Result};
use crate::model::{CreatureRecord, ListingPage, MemberSet, NamedResource};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

/// In-memory provider for testing.
///
/// Uses `RefCell` for the call log since the explorer is single-threaded.
#[derive(Default)]
pub struct MemProvider {
    creatures: BTreeMap<u32, CreatureRecord>,
    categories: HashMap<String, MemberSet>,
    abilities: HashMap<String, MemberSet>,
    moves: HashMap<String, MemberSet>,
    failing: HashSet<String>,
    calls: RefCell<Vec<String>>,
}

impl MemProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_creature(mut self, record: CreatureRecord) -> Self {
        self.creatures.insert(record.id, record);
        self
    }

    pub fn with_category(mut self, name: &str, ids: impl IntoIterator<Item = u32>) -> Self {
        self.categories.insert(name.to_string(), members(name, ids));
        self
    }

    pub fn with_ability(mut self, name: &str, ids: impl IntoIterator<Item = u32>) -> Self {
        self.abilities.insert(name.to_string(), members(name, ids));
        self
    }

    pub fn with_move(mut self, name: &str, ids: impl IntoIterator<Item = u32>) -> Self {
        self.moves.insert(name.to_string(), members(name, ids));
        self
    }

    /// Makes every request for `resource` (e.g. `"pokemon/4"`, `"type/fire"`) fail with a
    /// network error.
    pub fn failing(mut self, resource: &str) -> Self {
        self.failing.insert(resource.to_string());
        self
    }

    /// Every resource requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of requests whose resource starts with `prefix`.
    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record_call(&self, resource: String) -> Result<()> {
        let fails = self.failing.contains(&resource);
        self.calls.borrow_mut().push(resource.clone());
        if fails {
            return Err(DexError::Network(format!("simulated failure for {}", resource)));
        }
        Ok(())
    }
}

fn members(name: &str, ids: impl IntoIterator<Item = u32>) -> MemberSet {
    MemberSet {
        name: name.to_string(),
        ids: ids.into_iter().collect(),
    }
}

fn creature_url(id: u32) -> String {
    format!("https://pokeapi.co/api/v2/pokemon/{}/", id)
}

#[async_trait(?Send)]
impl DataProvider for MemProvider {
    async fn list_page(&self, offset: u32, limit: u32) -> Result<ListingPage> {
        self.record_call(format!("pokemon?offset={}&limit={}", offset, limit))?;
        let results = self
            .creatures
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|c| NamedResource::new(c.name.clone(), creature_url(c.id)))
            .collect();
        Ok(ListingPage {
            count: self.creatures.len() as u32,
            results,
        })
    }

    async fn creature(&self, id_or_name: &str) -> Result<CreatureRecord> {
        let found = match id_or_name.parse::<u32>() {
            Ok(id) => self.creatures.get(&id),
            Err(_) => self.creatures.values().find(|c| c.name == id_or_name),
        };
        // Log under the canonical id so tests can count fetches per creature.
        let key = found
            .map(|c| c.id.to_string())
            .unwrap_or_else(|| id_or_name.to_string());
        self.record_call(format!("pokemon/{}", key))?;
        found
            .cloned()
            .ok_or_else(|| DexError::not_found("Pokémon", id_or_name))
    }

    async fn category(&self, name: &str) -> Result<MemberSet> {
        self.record_call(format!("type/{}", name))?;
        self.categories
            .get(name)
            .cloned()
            .ok_or_else(|| DexError::not_found("Type", name))
    }

    async fn categories(&self) -> Result<Vec<NamedResource>> {
        self.record_call("type".to_string())?;
        let mut names: Vec<_> = self.categories.keys().cloned().collect();
        names.sort();
        Ok(without_sentinels(
            names
                .into_iter()
                .map(|n| NamedResource::new(n, String::new()))
                .collect(),
        ))
    }

    async fn ability(&self, name: &str) -> Result<MemberSet> {
        self.record_call(format!("ability/{}", name))?;
        self.abilities
            .get(name)
            .cloned()
            .ok_or_else(|| DexError::not_found("Ability", name))
    }

    async fn move_learners(&self, name: &str) -> Result<MemberSet> {
        self.record_call(format!("move/{}", name))?;
        self.moves
            .get(name)
            .cloned()
            .ok_or_else(|| DexError::not_found("Move", name))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{AbilitySlot, StatEntry, TypeSlot};

    const STAT_NAMES: [&str; 6] = [
        "hp",
        "attack",
        "defense",
        "special-attack",
        "special-defense",
        "speed",
    ];

    /// A record with the given categories and effort yields (`(stat, effort)` pairs).
    pub fn creature(id: u32, name: &str, types: &[&str], efforts: &[(&str, u32)]) -> CreatureRecord {
        let stats = STAT_NAMES
            .iter()
            .map(|stat| StatEntry {
                base_stat: 50,
                effort: efforts
                    .iter()
                    .find(|(s, _)| s == stat)
                    .map(|(_, e)| *e)
                    .unwrap_or(0),
                stat: NamedResource::new(*stat, ""),
            })
            .collect();
        CreatureRecord {
            id,
            name: name.to_string(),
            stats,
            types: types
                .iter()
                .enumerate()
                .map(|(i, t)| TypeSlot {
                    slot: i as u8 + 1,
                    category: NamedResource::new(*t, ""),
                })
                .collect(),
            abilities: vec![AbilitySlot {
                is_hidden: false,
                slot: 1,
                ability: NamedResource::new("overgrow", ""),
            }],
            sprites: Default::default(),
        }
    }

    /// A small catalog: the grass/poison starter line, the fire starter line and a
    /// couple of pure water and bug entries.
    pub fn starter_catalog() -> MemProvider {
        MemProvider::new()
            .with_creature(creature(1, "bulbasaur", &["grass", "poison"], &[("special-attack", 1)]))
            .with_creature(creature(2, "ivysaur", &["grass", "poison"], &[("special-attack", 1), ("special-defense", 1)]))
            .with_creature(creature(3, "venusaur", &["grass", "poison"], &[("special-attack", 2), ("special-defense", 1)]))
            .with_creature(creature(4, "charmander", &["fire"], &[("speed", 1)]))
            .with_creature(creature(5, "charmeleon", &["fire"], &[("special-attack", 1), ("speed", 1)]))
            .with_creature(creature(6, "charizard", &["fire", "flying"], &[("special-attack", 3)]))
            .with_creature(creature(7, "squirtle", &["water"], &[("defense", 1)]))
            .with_creature(creature(10, "caterpie", &["bug"], &[("hp", 1)]))
            .with_creature(creature(43, "oddish", &["grass", "poison"], &[("special-attack", 1)]))
            .with_category("grass", [1, 2, 3, 43])
            .with_category("poison", [1, 2, 3, 43])
            .with_category("fire", [4, 5, 6])
            .with_category("flying", [6])
            .with_category("water", [7])
            .with_category("bug", [10])
            .with_category("unknown", Vec::new())
            .with_ability("overgrow", [1, 2, 3])
            .with_ability("blaze", [4, 5, 6])
            .with_move("razor-leaf", [1, 2, 3, 43])
            .with_move("ember", [4, 5, 6])
    }

    /// `count` plain records with ids `1..=count`, for pagination tests.
    pub fn numbered_catalog(count: u32) -> MemProvider {
        (1..=count).fold(MemProvider::new(), |p, id| {
            p.with_creature(creature(id, &format!("mon-{}", id), &["normal"], &[]))
        })
    }
}
