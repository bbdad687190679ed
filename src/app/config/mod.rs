//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Every section is optional and
//! falls back to defaults. `ARBHUNTER_DATABASE` overrides the database path
//! and `RUST_LOG` overrides the log level.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{ConfigError, Result};

// Submodules
mod exchange;
mod logging;
mod service;
mod triangular;

// Re-export all public types from submodules
pub use exchange::{Exchange, ExchangesConfig, VenueConfig};
pub use logging::LoggingConfig;
pub use service::{DatabaseConfig, HttpConfig, SchedulerConfig};
pub use triangular::TriangularConfig;

/// Environment variable that overrides `[database].path`.
pub const DATABASE_ENV: &str = "ARBHUNTER_DATABASE";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub exchanges: ExchangesConfig,
    #[serde(default)]
    pub triangular: TriangularConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(path) = std::env::var(DATABASE_ENV) {
            if !path.trim().is_empty() {
                config.database.path = path.into();
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load the file if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] when the file exists.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected \"pretty\" or \"json\", got {:?}", self.logging.format),
            }
            .into());
        }
        if self.scheduler.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scheduler.interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.scheduler.adapter_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scheduler.adapter_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.http.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.database.enabled && self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.path",
            }
            .into());
        }

        self.validate_exchanges()?;
        self.validate_triangular()
    }

    #[allow(clippy::result_large_err)]
    fn validate_exchanges(&self) -> Result<()> {
        if self.exchanges.enabled.is_empty() {
            return Err(ConfigError::MissingField {
                field: "exchanges.enabled",
            }
            .into());
        }
        for (i, exchange) in self.exchanges.enabled.iter().enumerate() {
            if self.exchanges.enabled[..i].contains(exchange) {
                return Err(ConfigError::InvalidValue {
                    field: "exchanges.enabled",
                    reason: format!("{exchange} is listed twice"),
                }
                .into());
            }
        }
        for exchange in Exchange::ALL {
            let fee = self.exchanges.taker_fee(exchange);
            if fee < Decimal::ZERO || fee >= Decimal::ONE {
                return Err(ConfigError::InvalidValue {
                    field: "exchanges.taker_fee",
                    reason: format!("{exchange} fee must be in [0, 1), got {fee}"),
                }
                .into());
            }
            let base_url = self.exchanges.base_url(exchange);
            if let Err(e) = url::Url::parse(&base_url) {
                return Err(ConfigError::InvalidValue {
                    field: "exchanges.base_url",
                    reason: format!("{exchange}: {e}"),
                }
                .into());
            }
        }
        Ok(())
    }

    #[allow(clippy::result_large_err)]
    fn validate_triangular(&self) -> Result<()> {
        let cycle = self.triangular.cycle();
        if cycle.direct.is_empty() || cycle.inverted.is_empty() || cycle.bridge.is_empty() {
            return Err(ConfigError::MissingField {
                field: "triangular.direct",
            }
            .into());
        }
        if cycle.direct == cycle.inverted
            || cycle.direct == cycle.bridge
            || cycle.inverted == cycle.bridge
        {
            return Err(ConfigError::InvalidValue {
                field: "triangular",
                reason: "cycle legs must be three different symbols".to_string(),
            }
            .into());
        }
        for exchange in &self.triangular.exchanges {
            if !self.exchanges.enabled.contains(exchange) {
                return Err(ConfigError::InvalidValue {
                    field: "triangular.exchanges",
                    reason: format!("{exchange} is not in exchanges.enabled"),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
