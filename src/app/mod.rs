//! Application layer - configuration, orchestration and wiring.

mod bootstrap;
pub mod config;
mod orchestrator;

pub use bootstrap::{App, RunOptions};
pub use config::{
    Config, DatabaseConfig, Exchange, ExchangesConfig, HttpConfig, LoggingConfig,
    SchedulerConfig, TriangularConfig, VenueConfig,
};
pub use orchestrator::{CycleReport, Orchestrator, TriangularOutcome};
