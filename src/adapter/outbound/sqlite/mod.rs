//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed [`Recorder`](crate::port::outbound::Recorder)
//! using Diesel ORM.

pub mod database;
pub mod recorder;

pub use database::connection::{create_pool, run_migrations, DbPool};
pub use recorder::{RecordCounts, SqliteRecorder};
