//! Arbhunter - crypto spot-price arbitrage detection.
//!
//! Polls public price endpoints on several exchanges, then looks for two
//! kinds of mispricing:
//!
//! - **Pairwise**: the same currency pair quoted on two exchanges far enough
//!   apart to cover both taker fees.
//! - **Triangular**: a direct rate on one exchange that disagrees with the
//!   rate implied by two other pairs on the same exchange.
//!
//! Nothing is ever traded. Every snapshot and evaluation is handed to a
//! recorder (SQLite or logs).
//!
//! # Modules
//!
//! - [`domain`] - Snapshots, events and the pure detectors
//! - [`port`] - Capability traits the core consumes
//! - [`adapter`] - Exchange clients, recorders and the CLI
//! - [`app`] - Configuration, orchestration and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use arbhunter::domain::{detect_pairwise, CurrencyPair, ExchangeName, PriceSnapshot};
//! use rust_decimal_macros::dec;
//!
//! let snapshots = vec![
//!     PriceSnapshot::try_new(CurrencyPair::new("BTCUSD"), dec!(25000), dec!(0.002), ExchangeName::new("A")).unwrap(),
//!     PriceSnapshot::try_new(CurrencyPair::new("BTCUSD"), dec!(26000), dec!(0.004), ExchangeName::new("B")).unwrap(),
//! ];
//!
//! let events = detect_pairwise(&snapshots);
//! assert_eq!(events.len(), 1);
//! assert!(events[0].is_opportunity());
//! ```

pub mod adapter;
pub mod app;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
