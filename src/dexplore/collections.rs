//! # Favorites and Team
//!
//! Two bounded, user-curated collections:
//!
//! | Collection | Holds | Limit | Persisted as |
//! |------------|-------|-------|--------------|
//! | [`Favorites`] | creature ids, insertion ordered, no duplicates | 30 | JSON array of ids |
//! | [`Team`] | full records, ordered, duplicates allowed | 6 | JSON array of records |
//!
//! A rejected mutation leaves the collection untouched and returns
//! [`DexError::LimitExceeded`]. Persisting is the caller's job and happens after every
//! successful mutation.

use crate::error::{DexError, Result};
use crate::model::CreatureRecord;

pub const FAVORITES_LIMIT: usize = 30;
pub const TEAM_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorites {
    ids: Vec<u32>,
    limit: usize,
}

impl Default for Favorites {
    fn default() -> Self {
        Self::new(FAVORITES_LIMIT)
    }
}

impl Favorites {
    /// An empty set. Limits above [`FAVORITES_LIMIT`] are clamped.
    pub fn new(limit: usize) -> Self {
        Self {
            ids: Vec::new(),
            limit: limit.min(FAVORITES_LIMIT),
        }
    }

    /// Rebuilds the set from persisted ids, dropping duplicates and anything past the
    /// limit.
    pub fn from_ids(ids: impl IntoIterator<Item = u32>, limit: usize) -> Self {
        let mut favorites = Self::new(limit);
        for id in ids {
            if favorites.ids.len() == favorites.limit {
                break;
            }
            if !favorites.contains(id) {
                favorites.ids.push(id);
            }
        }
        favorites
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// `LimitExceeded` once the set is full.
    pub fn ensure_room(&self) -> Result<()> {
        if self.ids.len() >= self.limit {
            return Err(DexError::LimitExceeded {
                collection: "favorites",
                limit: self.limit,
            });
        }
        Ok(())
    }

    /// Adds `id` if absent (and there is room), removes it if present.
    pub fn toggle(&mut self, id: u32) -> Result<Toggled> {
        if self.remove(id) {
            return Ok(Toggled::Removed);
        }
        self.ensure_room()?;
        self.ids.push(id);
        Ok(Toggled::Added)
    }

    /// Returns whether `id` was a member.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&f| f != id);
        self.ids.len() != before
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    members: Vec<CreatureRecord>,
    limit: usize,
}

impl Default for Team {
    fn default() -> Self {
        Self::new(TEAM_LIMIT)
    }
}

impl Team {
    /// An empty team. Limits above [`TEAM_LIMIT`] are clamped.
    pub fn new(limit: usize) -> Self {
        Self {
            members: Vec::new(),
            limit: limit.min(TEAM_LIMIT),
        }
    }

    /// Rebuilds the team from persisted records, keeping at most `limit` of them.
    pub fn from_records(records: Vec<CreatureRecord>, limit: usize) -> Self {
        let mut team = Self::new(limit);
        team.members = records.into_iter().take(team.limit).collect();
        team
    }

    pub fn members(&self) -> &[CreatureRecord] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn ensure_room(&self) -> Result<()> {
        if self.members.len() >= self.limit {
            return Err(DexError::LimitExceeded {
                collection: "team members",
                limit: self.limit,
            });
        }
        Ok(())
    }

    pub fn add(&mut self, record: CreatureRecord) -> Result<()> {
        self.ensure_room()?;
        self.members.push(record);
        Ok(())
    }

    /// Removes the member in `slot` (0-based); later members shift down.
    pub fn remove(&mut self, slot: usize) -> Result<CreatureRecord> {
        if slot >= self.members.len() {
            return Err(DexError::InvalidInput(format!(
                "team slot {} is empty",
                slot + 1
            )));
        }
        Ok(self.members.remove(slot))
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Fixed-slot view: always `limit` entries, vacant slots are `None`.
    pub fn slots(&self) -> Vec<Option<&CreatureRecord>> {
        (0..self.limit).map(|i| self.members.get(i)).collect()
    }
}
