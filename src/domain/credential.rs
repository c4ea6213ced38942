//! The bearer credential identifying the signed-in user.

use std::fmt;

/// Opaque bearer token.
///
/// Contents are never inspected client-side. `Debug` is redacted so the
/// token does not leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header for this credential.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}

impl From<String> for Credential {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Credential {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Authentication state observed by the navigation guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

impl AuthState {
    #[must_use]
    pub const fn from_presence(present: bool) -> Self {
        if present {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }

    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated)
    }
}
