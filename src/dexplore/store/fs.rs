use super::{CollectionStore, FAVORITES_KEY, TEAM_KEY};
use crate::error::{DexError, Result};
use crate::model::CreatureRecord;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(DexError::Io)?;
        }
        Ok(())
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path).map_err(DexError::Io)?;
        if content.trim().is_empty() {
            return Ok(T::default());
        }
        serde_json::from_str(&content).map_err(DexError::Serialization)
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(value).map_err(DexError::Serialization)?;

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, content).map_err(DexError::Io)?;
        fs::rename(&tmp, self.key_path(key)).map_err(DexError::Io)?;

        debug!(key = key, root = %self.root.display(), "persisted");
        Ok(())
    }
}

impl CollectionStore for FileStore {
    fn load_favorites(&self) -> Result<Vec<u32>> {
        self.load(FAVORITES_KEY)
    }

    fn save_favorites(&mut self, ids: &[u32]) -> Result<()> {
        self.save(FAVORITES_KEY, ids)
    }

    fn load_team(&self) -> Result<Vec<CreatureRecord>> {
        self.load(TEAM_KEY)
    }

    fn save_team(&mut self, team: &[CreatureRecord]) -> Result<()> {
        self.save(TEAM_KEY, team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::memory::fixtures::creature;
    use tempfile::TempDir;

    #[test]
    fn missing_files_load_as_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("not-yet"));
        assert!(store.load_favorites().unwrap().is_empty());
        assert!(store.load_team().unwrap().is_empty());
    }

    #[test]
    fn favorites_round_trip_as_plain_id_array() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().to_path_buf());

        store.save_favorites(&[25, 1, 150]).unwrap();

        assert_eq!(store.load_favorites().unwrap(), vec![25, 1, 150]);
        let raw = fs::read_to_string(store.key_path("favorites")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, serde_json::json!([25, 1, 150]));
    }

    #[test]
    fn team_round_trip_preserves_order_and_records() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().join("nested"));
        let team = vec![
            creature(6, "charizard", &["fire", "flying"], &[("special-attack", 3)]),
            creature(1, "bulbasaur", &["grass", "poison"], &[("special-attack", 1)]),
            creature(6, "charizard", &["fire", "flying"], &[("special-attack", 3)]),
        ];

        store.save_team(&team).unwrap();

        let reopened = FileStore::new(temp.path().join("nested"));
        assert_eq!(reopened.load_team().unwrap(), team);
    }

    #[test]
    fn no_temp_files_left_behind() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().to_path_buf());
        store.save_favorites(&[1]).unwrap();
        store.save_favorites(&[2]).unwrap();

        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
        assert_eq!(store.load_favorites().unwrap(), vec![2]);
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().to_path_buf());
        fs::write(store.key_path("team"), "{not json").unwrap();
        assert!(matches!(
            store.load_team().unwrap_err(),
            DexError::Serialization(_)
        ));
    }
}
