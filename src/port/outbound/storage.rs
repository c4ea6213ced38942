//! Durable storage port for the credential.
//!
//! Stands in for the browser's local storage: a single well-known key that
//! survives restarts and is read once on cold start.

use crate::error::StorageError;

/// Well-known key the credential is stored under.
pub const CREDENTIAL_KEY: &str = "authToken";

/// Durable key/value storage holding the credential.
pub trait CredentialStorage: Send + Sync {
    /// Read the persisted token, `None` when absent.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Persist the token, replacing any previous value.
    fn save(&self, token: &str) -> Result<(), StorageError>;

    /// Remove the persisted token. Removing an absent token is not an error.
    fn remove(&self) -> Result<(), StorageError>;
}
