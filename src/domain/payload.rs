//! Request and response bodies exchanged with the remote service.
//!
//! Only the authentication bodies are fully typed. Bot configurations and
//! connection payloads stay close to the wire so the gateway never
//! reshapes what the caller intends to send.

use serde::{Deserialize, Serialize};

/// Login form. Sent form-urlencoded as `username` and `password`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Registration body, sent as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Successful login response.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".into()
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// How the remote service authenticates against an external bot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotAuthMethod {
    #[default]
    Token,
    Basic,
}

/// Connection parameters for an external bot API.
///
/// Used both for `test-connection` and, flattened, for `connect`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConnectionTest {
    pub api_url: String,
    pub auth_method: BotAuthMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Body for connecting an external bot.
#[derive(Debug, Clone, Serialize)]
pub struct ExternalBotConnect {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub connection: ConnectionTest,
}

/// Body for subscribing to a shared marketplace bot.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionRequest {
    pub shared_bot_id: String,
    /// Amount of capital allocated to the subscribed copy.
    pub allocation_amount: f64,
}
