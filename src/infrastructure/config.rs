//! Runtime configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPLIST_DATA_DIR` - Directory holding the saved list (default: `.shoplist`)
//! - `SHOPLIST_LOG_FILE` - Log file path (default: `<data dir>/shoplist.log`)
//! - `SHOPLIST_EXPORT_FILE` - Suggested CSV export path (default: `shopping-list.csv`)
//! - `RUST_LOG` - Log filter (default: `info`)

use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_DATA_DIR: &str = ".shoplist";
pub const DEFAULT_LOG_FILE_NAME: &str = "shoplist.log";
pub const DEFAULT_EXPORT_FILE: &str = "shopping-list.csv";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory backing the file store
    pub data_dir: PathBuf,
    /// Where tracing output goes; the terminal belongs to the UI
    pub log_file: PathBuf,
    /// Prefilled path in the CSV export prompt
    pub export_file: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = PathBuf::from(get_or_default(&lookup, "SHOPLIST_DATA_DIR", DEFAULT_DATA_DIR)?);
        let log_file = match get_optional(&lookup, "SHOPLIST_LOG_FILE")? {
            Some(path) => PathBuf::from(path),
            None => data_dir.join(DEFAULT_LOG_FILE_NAME),
        };
        let export_file = get_or_default(&lookup, "SHOPLIST_EXPORT_FILE", DEFAULT_EXPORT_FILE)?;

        Ok(Self {
            data_dir,
            log_file,
            export_file,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_file: PathBuf::from(DEFAULT_DATA_DIR).join(DEFAULT_LOG_FILE_NAME),
            export_file: DEFAULT_EXPORT_FILE.to_string(),
        }
    }
}

/// Get an optional variable, rejecting values that are set but blank.
fn get_optional<F>(lookup: &F, key: &str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "value is empty".to_string(),
        )),
        other => Ok(other),
    }
}

fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(get_optional(lookup, key)?.unwrap_or_else(|| default.to_string()))
}
