//! Login lifecycle.
//!
//! Wires the auth endpoints to the credential store: a successful login
//! stores the issued token, logout clears it.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use super::credential::CredentialStore;
use crate::domain::{AuthState, Credential, LoginForm, RegisterRequest, TokenResponse};
use crate::error::Result;
use crate::port::AuthApi;

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct Registered {
    /// The account body returned by the service.
    pub account: Value,
    /// Token obtained by signing in right after registering.
    pub token: TokenResponse,
}

/// Login, registration, and logout.
#[derive(Clone)]
pub struct Session {
    auth: Arc<dyn AuthApi>,
    store: CredentialStore,
}

impl Session {
    #[must_use]
    pub fn new(auth: Arc<dyn AuthApi>, store: CredentialStore) -> Self {
        Self { auth, store }
    }

    #[must_use]
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        self.store.auth_state()
    }

    /// Exchange email and password for a token and store it.
    ///
    /// # Errors
    ///
    /// Returns the gateway error on rejection, or a JSON error when the
    /// response does not carry an `access_token`. The stored credential is
    /// left untouched in both cases.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let body = self.auth.login(&LoginForm::new(email, password)).await?;
        let token: TokenResponse = serde_json::from_value(body)?;

        self.store.set(Credential::new(token.access_token.clone()));
        info!(token_type = %token.token_type, "Logged in");
        Ok(token)
    }

    /// Create an account, then sign in with the same credentials.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Registered> {
        let account = self.auth.register(request).await?;
        info!("Account registered");

        let token = self.login(&request.email, &request.password).await?;
        Ok(Registered { account, token })
    }

    /// Forget the credential. Requests issued afterwards go out anonymously.
    pub fn logout(&self) {
        self.store.clear();
        info!("Logged out");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
