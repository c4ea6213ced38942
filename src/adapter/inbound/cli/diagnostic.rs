//! Miette-based error diagnostics for CLI error presentation.
//!
//! Maps crate errors onto diagnostics with codes and help text. Config parse
//! errors carry the file content and a labeled span.

use std::path::Path;

use miette::{Diagnostic, Report, SourceSpan};
use thiserror::Error;

use crate::application::navigation::LOGIN_ROUTE;
use crate::error::{ConfigError as CrateConfigError, Error, StorageError};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(botgate::config))]
pub struct ConfigError {
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigError {
    #[must_use]
    pub fn new(message: impl Into<String>, src: impl Into<String>, offset: usize, len: usize) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Network connection error.
#[derive(Debug, Error, Diagnostic)]
#[error("connection failed: {message}")]
#[diagnostic(
    code(botgate::connection),
    help("check the service is reachable and `[api] base_url` is correct")
)]
pub struct ConnectionError {
    pub message: String,
}

/// The remote service rejected the credential.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(botgate::auth), help("run `botgate login` to sign in again"))]
pub struct AuthError {
    pub message: String,
}

/// Any other failure, with optional help.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(botgate::error))]
pub struct GeneralError {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

impl GeneralError {
    fn new(message: impl Into<String>, help: Option<&str>) -> Self {
        Self {
            message: message.into(),
            help: help.map(str::to_owned),
        }
    }
}

/// Turn a crate error into a renderable report.
///
/// `config_path` is re-read to show the offending snippet for TOML errors.
#[must_use]
pub fn report(error: Error, config_path: &Path) -> Report {
    match error {
        Error::Config(CrateConfigError::Parse(parse)) => {
            let message = format!("invalid config {}: {}", config_path.display(), parse.message());
            match (std::fs::read_to_string(config_path), parse.span()) {
                (Ok(src), Some(span)) => Report::new(
                    ConfigError::new(message, src, span.start, span.len())
                        .with_help("see the [api], [storage], [logging] and [navigation] sections"),
                ),
                _ => Report::new(GeneralError::new(message, None)),
            }
        }
        Error::Storage(StorageError::Corrupt { path, source }) => Report::new(GeneralError::new(
            format!("credential storage at {path} is corrupt: {source}"),
            Some("delete the file and run `botgate login`"),
        )),
        Error::NavigationDenied {
            route,
            redirect: Some(redirect),
        } if redirect == LOGIN_ROUTE => Report::new(AuthError {
            message: format!("'{route}' requires a signed-in session"),
        }),
        err if err.is_unauthorized() => Report::new(AuthError {
            message: err.to_string(),
        }),
        err @ (Error::Http(_) | Error::WebSocket(_) | Error::Connection(_)) => {
            Report::new(ConnectionError {
                message: err.to_string(),
            })
        }
        err @ Error::Remote { .. } => Report::new(GeneralError::new(
            err.to_string(),
            Some("the service rejected the request; check the arguments"),
        )),
        err => Report::new(GeneralError::new(err.to_string(), None)),
    }
}
