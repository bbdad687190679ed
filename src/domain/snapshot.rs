//! Normalised price quotes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::{CurrencyPair, EventId, ExchangeName, SnapshotId};

/// One exchange's quoted price for one currency pair at one instant.
///
/// The taker fee is a property of the exchange and is copied onto every
/// snapshot that exchange produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    id: SnapshotId,
    timestamp: DateTime<Utc>,
    pair: CurrencyPair,
    price: Decimal,
    fee: Decimal,
    exchange: ExchangeName,
    arbitrage_event: Option<EventId>,
    is_opportunity: bool,
}

impl PriceSnapshot {
    /// Create a snapshot stamped with a fresh id and the current time.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if the price is not positive, the fee is
    /// outside `[0, 1)`, or the symbol is empty.
    pub fn try_new(
        pair: CurrencyPair,
        price: Decimal,
        fee: Decimal,
        exchange: ExchangeName,
    ) -> Result<Self, DomainError> {
        Self::try_new_at(pair, price, fee, exchange, Utc::now())
    }

    /// Create a snapshot with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Same as [`PriceSnapshot::try_new`].
    pub fn try_new_at(
        pair: CurrencyPair,
        price: Decimal,
        fee: Decimal,
        exchange: ExchangeName,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if pair.is_empty() {
            return Err(DomainError::EmptySymbol);
        }
        if price <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice { pair, price });
        }
        if fee < Decimal::ZERO || fee >= Decimal::ONE {
            return Err(DomainError::FeeOutOfRange { fee });
        }

        Ok(Self {
            id: SnapshotId::new(),
            timestamp,
            pair,
            price,
            fee,
            exchange,
            arbitrage_event: None,
            is_opportunity: false,
        })
    }

    #[must_use]
    pub const fn id(&self) -> SnapshotId {
        self.id
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub const fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    /// Taker fee of the quoting exchange, as a fraction.
    #[must_use]
    pub const fn fee(&self) -> Decimal {
        self.fee
    }

    #[must_use]
    pub const fn exchange(&self) -> &ExchangeName {
        &self.exchange
    }

    /// The opportunity this snapshot was a leg of, if any.
    #[must_use]
    pub const fn arbitrage_event(&self) -> Option<EventId> {
        self.arbitrage_event
    }

    #[must_use]
    pub const fn is_opportunity(&self) -> bool {
        self.is_opportunity
    }

    /// Return a copy marked as a leg of the given opportunity.
    #[must_use]
    pub fn linked_to(&self, event: EventId) -> Self {
        Self {
            arbitrage_event: Some(event),
            is_opportunity: true,
            ..self.clone()
        }
    }
}
