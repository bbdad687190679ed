//! Outbound adapters (driven side).

pub mod exchange;
pub mod log;
pub mod sqlite;
