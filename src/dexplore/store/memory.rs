use super::CollectionStore;
use crate::error::{DexError, Result};
use crate::model::CreatureRecord;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    favorites: Vec<u32>,
    team: Vec<CreatureRecord>,
    saves: usize,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_favorites(mut self, ids: &[u32]) -> Self {
        self.favorites = ids.to_vec();
        self
    }

    pub fn with_team(mut self, team: Vec<CreatureRecord>) -> Self {
        self.team = team;
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Number of successful saves, across both keys.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error {
            return Err(DexError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl CollectionStore for InMemoryStore {
    fn load_favorites(&self) -> Result<Vec<u32>> {
        Ok(self.favorites.clone())
    }

    fn save_favorites(&mut self, ids: &[u32]) -> Result<()> {
        self.check_writable()?;
        self.favorites = ids.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn load_team(&self) -> Result<Vec<CreatureRecord>> {
        Ok(self.team.clone())
    }

    fn save_team(&mut self, team: &[CreatureRecord]) -> Result<()> {
        self.check_writable()?;
        self.team = team.to_vec();
        self.saves += 1;
        Ok(())
    }
}
