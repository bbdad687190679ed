//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the infrastructure the detector depends on:
//! exchanges that quote prices and a sink that records results.

pub mod exchange;
pub mod recorder;

pub use exchange::PriceSource;
pub use recorder::Recorder;
