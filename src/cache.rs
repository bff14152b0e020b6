//! Raw provider data cache, one JSON file per provider cache key

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::provider::{Provider, ProviderError};

const DATA_DIR_NAME: &str = ".yearmaps";
const CACHE_DIR_NAME: &str = "cache";

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("No home directory found")]
    NoHome,

    #[error("{0} exists but is not a directory")]
    NotADirectory(String),

    #[error("No cached data for {id} in {dir}; pass --input to import it")]
    Missing { id: String, dir: String },

    #[error("Cache I/O failed for {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Corrupt cache entry: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CacheError + '_ {
    move |source| CacheError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Create `dir` if missing; fail if the path is taken by a file
pub fn ensure_dir(dir: &Path) -> Result<PathBuf, CacheError> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(CacheError::NotADirectory(dir.display().to_string()));
        }
    } else {
        fs::create_dir_all(dir).map_err(io_error(dir))?;
    }
    Ok(dir.to_path_buf())
}

/// `~/.yearmaps`
pub fn default_data_dir() -> Result<PathBuf, CacheError> {
    let home = dirs::home_dir().ok_or(CacheError::NoHome)?;
    Ok(home.join(DATA_DIR_NAME))
}

pub fn cache_dir(data_dir: &Path) -> Result<PathBuf, CacheError> {
    ensure_dir(data_dir)?;
    ensure_dir(&data_dir.join(CACHE_DIR_NAME))
}

fn entry_path(cache_dir: &Path, key: &str) -> PathBuf {
    cache_dir.join(format!("{}.json", key))
}

pub fn read_raw(cache_dir: &Path, key: &str) -> Result<Option<Value>, CacheError> {
    let path = entry_path(cache_dir, key);
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path).map_err(io_error(&path))?;
    Ok(Some(serde_json::from_str(&text)?))
}

pub fn write_raw(cache_dir: &Path, key: &str, raw: &Value) -> Result<(), CacheError> {
    let path = entry_path(cache_dir, key);
    let text = serde_json::to_string_pretty(raw)?;
    fs::write(&path, text).map_err(io_error(&path))
}

/// Store freshly imported data, merged with the cached entry when the provider accumulates history
pub fn store(cache_dir: &Path, provider: &Provider, fresh: Value) -> Result<Value, CacheError> {
    let value = match (provider.merge, read_raw(cache_dir, provider.cache_key)?) {
        (Some(merge), Some(cached)) => merge(cached, fresh)?,
        _ => fresh,
    };
    write_raw(cache_dir, provider.cache_key, &value)?;
    Ok(value)
}

/// Cached raw data for `provider`, or an error telling the user how to import it
pub fn load(cache_dir: &Path, provider: &Provider) -> Result<Value, CacheError> {
    read_raw(cache_dir, provider.cache_key)?.ok_or_else(|| CacheError::Missing {
        id: provider.id.to_string(),
        dir: cache_dir.display().to_string(),
    })
}
