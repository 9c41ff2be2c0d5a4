//! Core data types.
//!
//! [`CreatureRecord`] mirrors the subset of the PokéAPI `/pokemon/{id}` payload the
//! explorer needs. It serializes back to the same JSON shape, so records persisted in
//! `team.json` can be read by anything that understands the provider's format.

use crate::error::DexError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A `{name, url}` pair as used throughout the provider's payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl NamedResource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    /// Effort value granted to whoever defeats this creature.
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u8,
    #[serde(rename = "type")]
    pub category: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub slot: u8,
    pub ability: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteUrl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(
        rename = "official-artwork",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub official_artwork: Option<SpriteUrl>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackWhiteSprites {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<SpriteUrl>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationFiveSprites {
    #[serde(
        rename = "black-white",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub black_white: Option<BlackWhiteSprites>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteVersions {
    #[serde(
        rename = "generation-v",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub generation_v: Option<GenerationFiveSprites>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<OtherSprites>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<SpriteVersions>,
}

/// One catalog entry. Immutable once fetched; identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub sprites: Sprites,
}

impl CreatureRecord {
    /// Official artwork when available, the plain front sprite otherwise.
    pub fn primary_sprite(&self) -> Option<&str> {
        self.sprites
            .other
            .as_ref()
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.as_deref())
            .or(self.sprites.front_default.as_deref())
    }

    pub fn animated_sprite(&self) -> Option<&str> {
        self.sprites
            .versions
            .as_ref()
            .and_then(|v| v.generation_v.as_ref())
            .and_then(|g| g.black_white.as_ref())
            .and_then(|bw| bw.animated.as_ref())
            .and_then(|a| a.front_default.as_deref())
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.category.name.as_str()).collect()
    }

    pub fn ability_names(&self) -> Vec<&str> {
        self.abilities
            .iter()
            .map(|a| a.ability.name.as_str())
            .collect()
    }

    /// Effort granted for `stat`, or `None` when the record has no such stat entry.
    pub fn effort_for(&self, stat: EffortStat) -> Option<u32> {
        self.stats
            .iter()
            .find(|s| s.stat.name == stat.api_name())
            .map(|s| s.effort)
    }

    /// Stats with a positive effort yield, in record order.
    pub fn effort_yields(&self) -> Vec<(&str, u32)> {
        self.stats
            .iter()
            .filter(|s| s.effort > 0)
            .map(|s| (s.stat.name.as_str(), s.effort))
            .collect()
    }
}

/// The six stats a creature can yield effort in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffortStat {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl EffortStat {
    pub const ALL: [EffortStat; 6] = [
        EffortStat::Hp,
        EffortStat::Attack,
        EffortStat::Defense,
        EffortStat::SpecialAttack,
        EffortStat::SpecialDefense,
        EffortStat::Speed,
    ];

    pub fn api_name(self) -> &'static str {
        match self {
            EffortStat::Hp => "hp",
            EffortStat::Attack => "attack",
            EffortStat::Defense => "defense",
            EffortStat::SpecialAttack => "special-attack",
            EffortStat::SpecialDefense => "special-defense",
            EffortStat::Speed => "speed",
        }
    }
}

impl fmt::Display for EffortStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

impl FromStr for EffortStat {
    type Err = DexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        EffortStat::ALL
            .into_iter()
            .find(|stat| stat.api_name() == wanted)
            .ok_or_else(|| {
                DexError::InvalidInput(format!(
                    "unknown stat '{}' (expected one of: {})",
                    s,
                    EffortStat::ALL.map(|s| s.api_name()).join(", ")
                ))
            })
    }
}

/// A named resource and the creature ids associated with it.
///
/// Categories list their members, abilities list the creatures that can have them and
/// moves list their learners; all three reduce to the same shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSet {
    pub name: String,
    pub ids: BTreeSet<u32>,
}

pub type CategoryRecord = MemberSet;
pub type AbilityRecord = MemberSet;
pub type MoveRecord = MemberSet;

/// One page of the provider's default sequential listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    pub count: u32,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const BULBASAUR: &str = r#"{
        "id": 1,
        "name": "bulbasaur",
        "height": 7,
        "stats": [
            {"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": "https://pokeapi.co/api/v2/stat/1/"}},
            {"base_stat": 65, "effort": 1, "stat": {"name": "special-attack", "url": "https://pokeapi.co/api/v2/stat/4/"}}
        ],
        "types": [
            {"slot": 1, "type": {"name": "grass", "url": "https://pokeapi.co/api/v2/type/12/"}},
            {"slot": 2, "type": {"name": "poison", "url": "https://pokeapi.co/api/v2/type/4/"}}
        ],
        "abilities": [
            {"is_hidden": false, "slot": 1, "ability": {"name": "overgrow", "url": "https://pokeapi.co/api/v2/ability/65/"}}
        ],
        "sprites": {
            "front_default": "front.png",
            "other": {"official-artwork": {"front_default": "artwork.png"}, "home": {}},
            "versions": {"generation-v": {"black-white": {"animated": {"front_default": "anim.gif"}}}}
        }
    }"#;

    #[test]
    fn parses_provider_payload_ignoring_unknown_fields() {
        let record: CreatureRecord = serde_json::from_str(BULBASAUR).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.category_names(), vec!["grass", "poison"]);
        assert_eq!(record.ability_names(), vec!["overgrow"]);
        assert_eq!(record.primary_sprite(), Some("artwork.png"));
        assert_eq!(record.animated_sprite(), Some("anim.gif"));
    }

    #[test]
    fn primary_sprite_falls_back_to_front_default() {
        let mut record: CreatureRecord = serde_json::from_str(BULBASAUR).unwrap();
        record.sprites.other = None;
        assert_eq!(record.primary_sprite(), Some("front.png"));
        record.sprites.front_default = None;
        assert_eq!(record.primary_sprite(), None);
    }

    #[test]
    fn effort_lookup_by_stat() {
        let record: CreatureRecord = serde_json::from_str(BULBASAUR).unwrap();
        assert_eq!(record.effort_for(EffortStat::SpecialAttack), Some(1));
        assert_eq!(record.effort_for(EffortStat::Hp), Some(0));
        assert_eq!(record.effort_for(EffortStat::Speed), None);
        assert_eq!(record.effort_yields(), vec![("special-attack", 1)]);
    }

    #[test]
    fn stat_names_parse_case_insensitively() {
        assert_eq!(
            " Special-Defense ".parse::<EffortStat>().unwrap(),
            EffortStat::SpecialDefense
        );
        assert!("luck".parse::<EffortStat>().is_err());
    }

    #[test]
    fn minimal_record_deserializes_with_defaults() {
        let record: CreatureRecord =
            serde_json::from_str(r#"{"id": 25, "name": "pikachu"}"#).unwrap();
        assert!(record.stats.is_empty());
        assert_eq!(record.sprites, Sprites::default());
    }
}
