//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bot identifier - newtype for type safety.
///
/// Opaque key scoping every per-bot operation. No format or emptiness
/// checks happen client-side; the remote service is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BotId(String);

impl BotId {
    /// Create a new `BotId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the bot ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BotId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for BotId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<u64> for BotId {
    fn from(n: u64) -> Self {
        Self::new(n.to_string())
    }
}
