//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`]: Mock [`PriceSource`](crate::port::outbound::PriceSource)
//!   implementations: `ScriptedSource`, `SlowSource`.
//! - [`recorder`]: Mock [`Recorder`](crate::port::outbound::Recorder)
//!   implementations: `RecordingRecorder`, `FailingRecorder`.
//! - [`domain`]: Builders for snapshots and the canonical detection inputs.

pub mod domain;
pub mod recorder;
pub mod source;
