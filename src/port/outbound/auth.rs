//! Authentication endpoint port.
//!
//! The session service signs in through this trait so it never depends on
//! the concrete REST client.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{LoginForm, RegisterRequest};
use crate::error::Result;

/// Remote sign-in and sign-up operations. Neither carries the credential.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange username and password for a token response body.
    async fn login(&self, form: &LoginForm) -> Result<Value>;

    /// Create an account and return the account body.
    async fn register(&self, user: &RegisterRequest) -> Result<Value>;
}
