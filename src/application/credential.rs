//! Process-wide credential store.
//!
//! One [`CredentialStore`] exists per process. Clones share the same value,
//! so the request gateway, the channel supervisor and the navigation guard
//! all observe a `set` or `clear` as soon as it returns.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::domain::{AuthState, Credential};
use crate::error::StorageError;
use crate::port::CredentialStorage;

struct Inner {
    current: RwLock<Option<Credential>>,
    storage: Box<dyn CredentialStorage>,
}

/// Shared handle to the current credential.
#[derive(Clone)]
pub struct CredentialStore {
    inner: Arc<Inner>,
}

impl CredentialStore {
    /// Cold start: read the persisted credential once from `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage exists but cannot be read or parsed.
    pub fn load<S>(storage: S) -> Result<Self, StorageError>
    where
        S: CredentialStorage + 'static,
    {
        let current = storage
            .load()?
            .filter(|token| !token.is_empty())
            .map(Credential::new);
        debug!(present = current.is_some(), "Loaded persisted credential");

        Ok(Self {
            inner: Arc::new(Inner {
                current: RwLock::new(current),
                storage: Box::new(storage),
            }),
        })
    }

    /// Current credential, if any.
    #[must_use]
    pub fn get(&self) -> Option<Credential> {
        self.inner.current.read().clone()
    }

    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        AuthState::from_presence(self.inner.current.read().is_some())
    }

    /// Store `token` and persist it. An empty token behaves like [`clear`].
    ///
    /// A failed durable write is logged; the in-memory value still changes.
    ///
    /// [`clear`]: Self::clear
    pub fn set(&self, token: Credential) {
        if token.as_str().is_empty() {
            self.clear();
            return;
        }
        if let Err(err) = self.inner.storage.save(token.as_str()) {
            warn!(error = %err, "Failed to persist credential");
        }
        *self.inner.current.write() = Some(token);
        info!("Credential set");
    }

    /// Replace the in-memory credential without touching durable storage.
    ///
    /// Used for credentials supplied through the environment.
    pub fn set_transient(&self, token: Credential) {
        *self.inner.current.write() = Some(token).filter(|t| !t.as_str().is_empty());
        debug!("Transient credential set");
    }

    /// Drop the credential. Clearing an absent credential is a no-op.
    pub fn clear(&self) {
        if let Err(err) = self.inner.storage.remove() {
            warn!(error = %err, "Failed to remove persisted credential");
        }
        if self.inner.current.write().take().is_some() {
            info!("Credential cleared");
        }
    }

    /// `set` when `Some`, `clear` when `None`.
    pub fn replace(&self, token: Option<Credential>) {
        match token {
            Some(token) => self.set(token),
            None => self.clear(),
        }
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("state", &self.auth_state())
            .finish()
    }
}
