//! # Configuration
//!
//! Stored as `config.json` in the data directory. Every field is optional in the file;
//! missing fields fall back to compiled defaults, and a missing file means all
//! defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `api_base` | `https://pokeapi.co/api/v2` | Data provider base URL |
//! | `page_size` | `30` | Entries per page |
//! | `detail_batch_size` | `80` | Concurrent detail fetches per batch when filtering by effort yield |
//! | `catalog_ceiling` | none | Use ids `1..=N` as the unfiltered catalog instead of the live listing |
//! | `favorites_limit` | `30` | Favorites capacity (never above 30) |
//! | `team_limit` | `6` | Team capacity (never above 6) |
//! | `user_agent` | `dexplore/<version>` | Sent with every request |
//!
//! `DEX_API_BASE` overrides `api_base` from the environment.

use crate::collections::{FAVORITES_LIMIT, TEAM_LIMIT};
use crate::error::{DexError, Result};
use crate::filter::{FilterEngine, Universe, DEFAULT_DETAIL_BATCH_SIZE};
use crate::pagination::PAGE_SIZE;
use crate::provider::http::DEFAULT_API_BASE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const API_BASE_ENV: &str = "DEX_API_BASE";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DexConfig {
    pub api_base: String,
    pub page_size: u32,
    pub detail_batch_size: usize,
    pub catalog_ceiling: Option<u32>,
    pub favorites_limit: usize,
    pub team_limit: usize,
    pub user_agent: String,
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: PAGE_SIZE,
            detail_batch_size: DEFAULT_DETAIL_BATCH_SIZE,
            catalog_ceiling: None,
            favorites_limit: FAVORITES_LIMIT,
            team_limit: TEAM_LIMIT,
            user_agent: concat!("dexplore/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl DexConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DexError::Io)?;
        let config: DexConfig =
            serde_json::from_str(&content).map_err(DexError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DexError::Io)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(DexError::Serialization)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content).map_err(DexError::Io)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(DexError::Config("page_size must be at least 1".into()));
        }
        if self.detail_batch_size == 0 {
            return Err(DexError::Config("detail_batch_size must be at least 1".into()));
        }
        if self.catalog_ceiling == Some(0) {
            return Err(DexError::Config("catalog_ceiling must be at least 1".into()));
        }
        if self.api_base.trim().is_empty() {
            return Err(DexError::Config("api_base cannot be empty".into()));
        }
        Ok(())
    }

    /// Applies overrides from environment lookups (`std::env::var` in production).
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(API_BASE_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_base = base;
        }
        self
    }

    pub fn filter_engine(&self) -> FilterEngine {
        let universe = match self.catalog_ceiling {
            Some(ceiling) => Universe::Fixed(ceiling),
            None => Universe::Listing,
        };
        FilterEngine::new(universe, self.detail_batch_size)
    }

    pub fn favorites_limit(&self) -> usize {
        self.favorites_limit.min(FAVORITES_LIMIT)
    }

    pub fn team_limit(&self) -> usize {
        self.team_limit.min(TEAM_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = DexConfig::default();
        assert_eq!(config.api_base, "https://pokeapi.co/api/v2");
        assert_eq!(config.page_size, 30);
        assert_eq!(config.detail_batch_size, 80);
        assert_eq!(config.catalog_ceiling, None);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = DexConfig::load(temp.path()).unwrap();
        assert_eq!(config, DexConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.json"),
            r#"{"catalog_ceiling": 1010}"#,
        )
        .unwrap();

        let config = DexConfig::load(temp.path()).unwrap();

        assert_eq!(config.catalog_ceiling, Some(1010));
        assert_eq!(config.page_size, 30);
        assert_eq!(config.filter_engine().universe, Universe::Fixed(1010));
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let config = DexConfig {
            page_size: 12,
            ..Default::default()
        };
        config.save(temp.path()).unwrap();
        assert_eq!(DexConfig::load(temp.path()).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.json"), r#"{"page_size": 0}"#).unwrap();
        assert!(matches!(
            DexConfig::load(temp.path()).unwrap_err(),
            DexError::Config(_)
        ));
    }

    #[test]
    fn test_limits_never_exceed_hard_caps() {
        let config = DexConfig {
            favorites_limit: 99,
            team_limit: 3,
            ..Default::default()
        };
        assert_eq!(config.favorites_limit(), 30);
        assert_eq!(config.team_limit(), 3);
    }

    #[test]
    fn test_env_override() {
        let config = DexConfig::default().with_env(|key| {
            (key == API_BASE_ENV).then(|| "http://localhost:9000/api/v2".to_string())
        });
        assert_eq!(config.api_base, "http://localhost:9000/api/v2");

        let untouched = DexConfig::default().with_env(|_| Some("  ".to_string()));
        assert_eq!(untouched.api_base, DEFAULT_API_BASE);
    }
}
