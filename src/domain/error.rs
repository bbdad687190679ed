//! Domain validation and detection errors.
//!
//! [`DomainError`] covers invariants checked by `try_new` constructors.
//! [`DetectionError`] covers inputs a detector cannot turn into an event.
//!
//! # Examples
//!
//! ```
//! use arbhunter::domain::error::DomainError;
//! use arbhunter::domain::{CurrencyPair, ExchangeName, PriceSnapshot};
//! use rust_decimal_macros::dec;
//!
//! let result = PriceSnapshot::try_new(
//!     CurrencyPair::new("BTCUSD"),
//!     dec!(0),
//!     dec!(0.002),
//!     ExchangeName::new("Gemini"),
//! );
//!
//! assert!(matches!(result, Err(DomainError::NonPositivePrice { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use super::{CurrencyPair, ExchangeName};

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Quoted prices must be strictly positive.
    #[error("price for {pair} must be positive, got {price}")]
    NonPositivePrice {
        /// The pair the price was quoted for.
        pair: CurrencyPair,
        /// The rejected price.
        price: Decimal,
    },

    /// Taker fees are fractions in `[0, 1)`.
    #[error("taker fee must be in [0, 1), got {fee}")]
    FeeOutOfRange {
        /// The rejected fee.
        fee: Decimal,
    },

    /// Currency-pair symbols cannot be empty.
    #[error("currency pair symbol cannot be empty")]
    EmptySymbol,
}

/// Inputs that a detector cannot evaluate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    /// One or more legs of a triangular cycle had no snapshot.
    ///
    /// Reported instead of substituting a zero rate, which would
    /// produce a meaningless cross rate.
    #[error("incomplete triangular cycle on {exchange}: missing {missing:?}")]
    IncompleteCycle {
        /// Exchange whose snapshot set was evaluated.
        exchange: ExchangeName,
        /// Leg symbols absent from the set.
        missing: Vec<CurrencyPair>,
    },

    /// An arithmetic step overflowed or divided by zero.
    #[error("arithmetic failure while evaluating {context}")]
    Arithmetic {
        /// Which computation failed.
        context: &'static str,
    },
}
