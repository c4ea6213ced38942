//! In-memory credential storage.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::StorageError;
use crate::port::CredentialStorage;

/// Credential storage backed by a shared slot.
///
/// Clone the slot with [`snapshot_handle`](Self::snapshot_handle) before
/// handing the storage to a store, then assert on what was persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStorage {
    slot: Arc<Mutex<Option<String>>>,
    fail_writes: bool,
}

impl MemoryCredentialStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let storage = Self::new();
        *storage.slot.lock() = Some(token.to_owned());
        storage
    }

    /// Make every save and remove fail.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn snapshot_handle(&self) -> Arc<Mutex<Option<String>>> {
        Arc::clone(&self.slot)
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io {
                path: "memory".into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only storage"),
            });
        }
        Ok(())
    }
}

impl CredentialStorage for MemoryCredentialStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        *self.slot.lock() = Some(token.to_owned());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        self.check_writable()?;
        *self.slot.lock() = None;
        Ok(())
    }
}
