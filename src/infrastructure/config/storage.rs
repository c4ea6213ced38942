//! Durable storage configuration.

use std::path::PathBuf;

use serde::Deserialize;

use super::paths;

/// Where the credential survives between runs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Storage file. Defaults to `~/.botgate/storage.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(paths::default_storage)
    }
}
