//! Service configuration for scheduling, HTTP and the database.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Detection cycle timing.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between ticks (default: 5).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Upper bound on one adapter's fetch within a tick (default: 4000).
    #[serde(default = "default_adapter_timeout_ms")]
    pub adapter_timeout_ms: u64,
}

const fn default_interval_secs() -> u64 {
    5
}

const fn default_adapter_timeout_ms() -> u64 {
    4000
}

impl SchedulerConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    #[must_use]
    pub const fn adapter_timeout(&self) -> Duration {
        Duration::from_millis(self.adapter_timeout_ms)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            adapter_timeout_ms: default_adapter_timeout_ms(),
        }
    }
}

/// Shared HTTP client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout (default: 3000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// TCP connect timeout (default: 2000).
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout_ms() -> u64 {
    3000
}

const fn default_connect_timeout_ms() -> u64 {
    2000
}

fn default_user_agent() -> String {
    concat!("arbhunter/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

/// SQLite recorder settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Record to SQLite; when false results are only logged.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Path to the SQLite database file.
    ///
    /// Defaults to "arbhunter.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

const fn default_true() -> bool {
    true
}

fn default_database_path() -> PathBuf {
    PathBuf::from("arbhunter.db")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_database_path(),
        }
    }
}
