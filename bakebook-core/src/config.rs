//! Configuration from environment variables.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::store::FileStorage;

pub const DATA_DIR_VAR: &str = "BAKEBOOK_DATA_DIR";
pub const EXPORT_DIR_VAR: &str = "BAKEBOOK_EXPORT_DIR";
pub const BLOG_URL_VAR: &str = "BAKEBOOK_BLOG_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the persisted recipe collection.
    pub data_dir: PathBuf,
    /// Directory exported cards are written to.
    pub export_dir: PathBuf,
    /// Base URL of the blog content API, if configured.
    pub blog_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `BAKEBOOK_DATA_DIR`: data directory (default: "~/.bakebook")
    /// - `BAKEBOOK_EXPORT_DIR`: export directory (default: current directory)
    /// - `BAKEBOOK_BLOG_URL`: blog API base URL (default: none)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| -> Result<Option<String>, ConfigError> {
            match lookup(key) {
                Some(value) if value.trim().is_empty() => {
                    Err(ConfigError::EmptyVar(key.to_string()))
                }
                other => Ok(other),
            }
        };

        let data_dir = match non_empty(DATA_DIR_VAR)? {
            Some(dir) => PathBuf::from(dir),
            None => FileStorage::default_dir().ok_or(ConfigError::NoDataDir)?,
        };

        let export_dir = non_empty(EXPORT_DIR_VAR)?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let blog_url = non_empty(BLOG_URL_VAR)?;

        Ok(Self {
            data_dir,
            export_dir,
            blog_url,
        })
    }
}
