//! # Storage Layer
//!
//! Persists the user's collections between runs. The [`CollectionStore`] trait keeps
//! the session and command layers independent of where the data lives.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one JSON file per key
//! - [`memory::InMemoryStore`]: no persistence, for tests
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── favorites.json   # JSON array of integer ids
//! ├── team.json        # JSON array of full creature records (up to 6)
//! └── config.json      # Optional configuration
//! ```
//!
//! Favorites hold ids only and are resolved through the record cache when rendered.
//! Team entries are stored whole so the team renders without touching the network.

use crate::error::Result;
use crate::model::CreatureRecord;

pub mod fs;
pub mod memory;

pub const FAVORITES_KEY: &str = "favorites";
pub const TEAM_KEY: &str = "team";

/// Abstract interface for collection persistence.
///
/// Loading a key that was never saved yields an empty collection.
pub trait CollectionStore {
    fn load_favorites(&self) -> Result<Vec<u32>>;

    fn save_favorites(&mut self, ids: &[u32]) -> Result<()>;

    fn load_team(&self) -> Result<Vec<CreatureRecord>>;

    fn save_team(&mut self, team: &[CreatureRecord]) -> Result<()>;
}
