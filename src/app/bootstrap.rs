//! Wiring from configuration to a running orchestrator.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::config::Config;
use super::orchestrator::{CycleReport, Orchestrator};
use crate::adapter::outbound::exchange::{create_sources, http};
use crate::adapter::outbound::log::LogRecorder;
use crate::adapter::outbound::sqlite::SqliteRecorder;
use crate::error::Result;
use crate::port::outbound::Recorder;

/// Command-line overrides applied on top of the loaded config.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Log results instead of writing them to SQLite.
    pub no_db: bool,
    /// Replace `[scheduler].interval_secs`.
    pub interval_secs: Option<u64>,
}

/// Application entry points.
pub struct App;

impl App {
    /// Build the orchestrator described by `config`.
    ///
    /// The recorder's health check runs here. A failing check is logged and
    /// does not stop start-up.
    ///
    /// # Errors
    ///
    /// Returns an error if the SQLite recorder cannot be opened.
    pub async fn build(config: &Config, options: &RunOptions) -> Result<Orchestrator> {
        let mut config = config.clone();
        if let Some(secs) = options.interval_secs {
            config.scheduler.interval_secs = secs;
        }

        let client = http::build_client(&config.http);
        let sources = create_sources(&client, &config.exchanges);
        let recorder = Self::build_recorder(&config, options)?;

        if let Err(e) = recorder.health_check().await {
            warn!(recorder = recorder.name(), error = %e, "Recorder health check failed");
        }

        info!(
            exchanges = ?config.exchanges.enabled,
            recorder = recorder.name(),
            "Application wired"
        );
        Ok(Orchestrator::from_config(&config, sources, recorder))
    }

    fn build_recorder(config: &Config, options: &RunOptions) -> Result<Arc<dyn Recorder>> {
        if !config.database.enabled || options.no_db {
            info!("Persistence disabled, logging results only");
            return Ok(Arc::new(LogRecorder));
        }
        let recorder = SqliteRecorder::open(&config.database.path)?;
        info!(path = %config.database.path.display(), "Recording to SQLite");
        Ok(Arc::new(recorder))
    }

    /// Run one detection tick and return its report.
    ///
    /// # Errors
    ///
    /// Returns an error if wiring fails.
    pub async fn run_once(config: &Config, options: &RunOptions) -> Result<CycleReport> {
        let orchestrator = Self::build(config, options).await?;
        Ok(orchestrator.run_cycle().await)
    }

    /// Run until `shutdown` flips to true.
    ///
    /// # Errors
    ///
    /// Returns an error if wiring fails.
    pub async fn run_with_shutdown(
        config: &Config,
        options: &RunOptions,
        shutdown: watch::Receiver<bool>,
    ) -> Result<()> {
        let orchestrator = Self::build(config, options).await?;
        orchestrator.run_with_shutdown(shutdown).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_db(dir: &tempfile::TempDir) -> Config {
        let mut config = Config::default();
        config.database.path = dir.path().join("nested").join("arbhunter.db");
        config
    }

    #[test]
    fn no_db_selects_log_recorder() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_db(&dir);
        let options = RunOptions {
            no_db: true,
            ..RunOptions::default()
        };

        let recorder = App::build_recorder(&config, &options).unwrap();

        assert_eq!(recorder.name(), "log");
        assert!(!config.database.path.exists());
    }

    #[test]
    fn disabled_database_selects_log_recorder() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_with_db(&dir);
        config.database.enabled = false;

        let recorder = App::build_recorder(&config, &RunOptions::default()).unwrap();

        assert_eq!(recorder.name(), "log");
    }

    #[test]
    fn enabled_database_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_db(&dir);

        let recorder = App::build_recorder(&config, &RunOptions::default()).unwrap();

        assert_eq!(recorder.name(), "sqlite");
        assert!(config.database.path.exists());
    }

    #[tokio::test]
    async fn interval_override_applies() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_db(&dir);
        let options = RunOptions {
            no_db: true,
            interval_secs: Some(42),
        };

        let orchestrator = App::build(&config, &options).await.unwrap();

        assert_eq!(orchestrator.interval(), std::time::Duration::from_secs(42));
    }

    #[tokio::test]
    async fn run_with_shutdown_returns_when_already_stopped() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_db(&dir);
        let options = RunOptions {
            no_db: true,
            ..RunOptions::default()
        };
        let (_tx, rx) = watch::channel(true);

        App::run_with_shutdown(&config, &options, rx).await.unwrap();

        assert!(!config.database.path.exists());
    }
}
