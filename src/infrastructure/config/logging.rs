//! Logging configuration and initialization.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "warn".into()
}

fn default_format() -> String {
    "pretty".into()
}

impl LoggingConfig {
    /// Raise the level for `-v` (debug) and `-vv` (trace).
    #[must_use]
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        match verbose {
            0 => {}
            1 => self.level = "debug".into(),
            _ => self.level = "trace".into(),
        }
        self
    }

    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// Logs go to stderr so command output on stdout stays machine-readable.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let result = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
        // A subscriber already installed (e.g. by a test harness) is fine.
        let _ = result;
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}
