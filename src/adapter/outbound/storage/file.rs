//! File-backed credential storage.
//!
//! A small JSON object of string keys, mirroring browser local storage. The
//! credential lives under [`CREDENTIAL_KEY`]; other keys are preserved.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::StorageError;
use crate::port::{CredentialStorage, CREDENTIAL_KEY};

/// Credential storage in a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStorage {
    path: PathBuf,
}

impl FileCredentialStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn read_entries(&self) -> Result<Map<String, Value>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let content = serde_json::to_string_pretty(entries).map_err(|source| {
            StorageError::Corrupt {
                path: self.path.display().to_string(),
                source,
            }
        })?;

        // Write then rename so a crash never leaves a half-written file.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content).map_err(|e| self.io_error(e))?;
        restrict_permissions(&tmp).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), "Credential storage written");
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

impl CredentialStorage for FileCredentialStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .read_entries()?
            .get(CREDENTIAL_KEY)
            .and_then(Value::as_str)
            .map(str::to_owned))
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        entries.insert(CREDENTIAL_KEY.to_owned(), Value::String(token.to_owned()));
        self.write_entries(&entries)
    }

    fn remove(&self) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        if entries.remove(CREDENTIAL_KEY).is_none() {
            return Ok(());
        }
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(self.io_error(e)),
            };
        }
        self.write_entries(&entries)
    }
}
