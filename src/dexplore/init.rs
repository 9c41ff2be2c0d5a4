use crate::api::DexApi;
use crate::config::DexConfig;
use crate::error::{DexError, Result};
use crate::provider::http::HttpProvider;
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

/// Overrides the data directory (favorites, team and config) when set.
pub const DATA_DIR_ENV: &str = "DEX_DATA_DIR";

pub struct DexContext {
    pub api: DexApi<HttpProvider, FileStore>,
    pub data_dir: PathBuf,
}

/// `DEX_DATA_DIR` if set, otherwise the platform data directory.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "dexplore", "dexplore")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DexError::Config("could not determine a data directory".into()))
}

pub fn initialize() -> Result<DexContext> {
    let data_dir = data_dir()?;
    let config = DexConfig::load(&data_dir)?.with_env(|key| std::env::var(key).ok());
    config.validate()?;
    debug!(data_dir = %data_dir.display(), api_base = %config.api_base, "initializing");

    let provider = HttpProvider::new(&config.api_base, &config.user_agent)?;
    let store = FileStore::new(data_dir.clone());
    let api = DexApi::new(provider, store, config)?;

    Ok(DexContext { api, data_dir })
}
