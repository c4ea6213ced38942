//! Path utilities for botgate.
//!
//! All data lives under `~/.botgate/`:
//! - `~/.botgate/config.toml` - main configuration
//! - `~/.botgate/storage.json` - durable credential storage

use std::path::PathBuf;

/// Returns the botgate home directory (`~/.botgate/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".botgate")
}

/// Returns the default config file path (`~/.botgate/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default credential storage path (`~/.botgate/storage.json`).
pub fn default_storage() -> PathBuf {
    home_dir().join("storage.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_botgate_home() {
        assert!(home_dir().to_string_lossy().contains(".botgate"));
        assert!(default_config().ends_with(".botgate/config.toml"));
        assert!(default_storage().ends_with(".botgate/storage.json"));
    }
}
