//! Vault configuration.
//!
//! Resolved once at process startup and passed into [`FileVault`](crate::FileVault), so request
//! handling never reads process-wide environment variables.

use crate::constants::{ACTIVE_DIR_NAME, ARCHIVE_DIR_NAME, DEFAULT_DATA_DIR};
use std::path::{Path, PathBuf};

/// Where the active and archive stores live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VaultConfig {
    data_dir: PathBuf,
}

impl VaultConfig {
    /// Create a config rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Build a config from an optional override such as the `SAFEKEEP_DATA_DIR` value.
    ///
    /// `None` or an empty/whitespace value selects [`DEFAULT_DATA_DIR`].
    pub fn from_env_value(value: Option<String>) -> Self {
        let data_dir = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        Self::new(data_dir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn active_dir(&self) -> PathBuf {
        self.data_dir.join(ACTIVE_DIR_NAME)
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.data_dir.join(ARCHIVE_DIR_NAME)
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
