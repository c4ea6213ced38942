//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; endpoint URLs may be overridden
//! through `BOTGATE_API_URL` and `BOTGATE_WS_URL`.
//!
//! # Example
//!
//! ```no_run
//! use botgate::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::api::ApiConfig;
use super::logging::LoggingConfig;
use super::storage::StorageConfig;
use crate::application::navigation::GuardPolicy;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `[api] base_url`.
pub const ENV_API_URL: &str = "BOTGATE_API_URL";
/// Environment variable overriding `[api] ws_url`.
pub const ENV_WS_URL: &str = "BOTGATE_WS_URL";
/// Environment variable supplying a session-only credential.
pub const ENV_TOKEN: &str = "BOTGATE_TOKEN";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Remote service endpoints and HTTP timeouts.
    #[serde(default)]
    pub api: ApiConfig,

    /// Durable credential storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Navigation guard policy. Defaults to `requires_auth`.
    #[serde(default)]
    pub navigation: GuardPolicy,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `BOTGATE_API_URL` / `BOTGATE_WS_URL` and re-validate.
    #[allow(clippy::result_large_err)]
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(
            std::env::var(ENV_API_URL).ok(),
            std::env::var(ENV_WS_URL).ok(),
        )
    }

    #[allow(clippy::result_large_err)]
    fn with_overrides(mut self, api_url: Option<String>, ws_url: Option<String>) -> Result<Self> {
        if let Some(api_url) = api_url {
            self.api.base_url = api_url;
        }
        if let Some(ws_url) = ws_url {
            self.api.ws_url = Some(ws_url);
        }
        self.validate()?;
        Ok(self)
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        self.api.validate()?;
        if let GuardPolicy::PublicSet { public, home, .. } = &self.navigation {
            if public.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "navigation.public",
                    reason: "must list at least the login route".to_string(),
                }
                .into());
            }
            if home.is_empty() {
                return Err(ConfigError::MissingField {
                    field: "navigation.home",
                }
                .into());
            }
        }
        Ok(())
    }
}
