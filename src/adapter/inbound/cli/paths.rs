//! Path utilities for arbhunter.
//!
//! User data lives under `~/.arbhunter/`:
//! - `~/.arbhunter/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the arbhunter home directory (`~/.arbhunter/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".arbhunter")
}

/// Returns the default config file path (`~/.arbhunter/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
