//! Remote service endpoint configuration.

use serde::Deserialize;
use url::Url;

use crate::error::{ConfigError, Result};

/// Endpoint and HTTP settings for the bot management service.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// REST base URL, e.g. `http://localhost:8000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Streaming base URL. Derived from `base_url` when unset
    /// (`http` → `ws`, `https` → `wss`).
    #[serde(default)]
    pub ws_url: Option<String>,

    /// Total request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// TCP connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_connect_timeout_ms() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            ws_url: None,
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl ApiConfig {
    /// Parsed REST base URL.
    pub fn base_url(&self) -> Result<Url> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        let url = parse_url("base_url", &self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }
            .into());
        }
        Ok(url)
    }

    /// Parsed streaming base URL, explicit or derived from `base_url`.
    pub fn ws_url(&self) -> Result<Url> {
        let url = match self.ws_url.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_url("ws_url", raw)?,
            _ => {
                let mut url = self.base_url()?;
                let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
                url.set_scheme(scheme).map_err(|()| ConfigError::InvalidValue {
                    field: "ws_url",
                    reason: format!("cannot derive {scheme} URL from {}", self.base_url),
                })?;
                url
            }
        };
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(ConfigError::InvalidValue {
                field: "ws_url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }
            .into());
        }
        Ok(url)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        self.base_url()?;
        self.ws_url()?;
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connect_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("{raw} cannot be a base URL"),
        }
        .into());
    }
    Ok(url)
}
