//! Arbitrage event records produced by the detectors.
//!
//! Both event kinds are immutable once built: every field is private and
//! exposed through accessors.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CurrencyPair, EventId, ExchangeName, PriceSnapshot, SnapshotId};

/// One side of a pairwise comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairLeg {
    snapshot: SnapshotId,
    price: Decimal,
    exchange: ExchangeName,
}

impl PairLeg {
    fn from_snapshot(snapshot: &PriceSnapshot) -> Self {
        Self {
            snapshot: snapshot.id(),
            price: snapshot.price(),
            exchange: snapshot.exchange().clone(),
        }
    }

    #[must_use]
    pub const fn snapshot(&self) -> SnapshotId {
        self.snapshot
    }

    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub const fn exchange(&self) -> &ExchangeName {
        &self.exchange
    }
}

/// The same currency pair quoted on two different exchanges.
///
/// Legs are ordered by the detector's sort order, not by price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseArbitrageEvent {
    id: EventId,
    timestamp: DateTime<Utc>,
    pair: CurrencyPair,
    leg_a: PairLeg,
    leg_b: PairLeg,
    projected_profit: Decimal,
    is_opportunity: bool,
}

impl PairwiseArbitrageEvent {
    /// Build an event from two snapshots of the same pair and the
    /// computed profit percentage.
    pub(crate) fn new(
        a: &PriceSnapshot,
        b: &PriceSnapshot,
        projected_profit: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EventId::new(),
            timestamp,
            pair: a.pair().clone(),
            leg_a: PairLeg::from_snapshot(a),
            leg_b: PairLeg::from_snapshot(b),
            projected_profit,
            is_opportunity: projected_profit > Decimal::ZERO,
        }
    }

    #[must_use]
    pub const fn id(&self) -> EventId {
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
    pub const fn leg_a(&self) -> &PairLeg {
        &self.leg_a
    }

    #[must_use]
    pub const fn leg_b(&self) -> &PairLeg {
        &self.leg_b
    }

    /// Net return in percent after both taker fees.
    #[must_use]
    pub const fn projected_profit(&self) -> Decimal {
        self.projected_profit
    }

    #[must_use]
    pub const fn is_opportunity(&self) -> bool {
        self.is_opportunity
    }

    /// Whether the given snapshot is one of this event's legs.
    #[must_use]
    pub fn involves(&self, snapshot: SnapshotId) -> bool {
        self.leg_a.snapshot == snapshot || self.leg_b.snapshot == snapshot
    }
}

/// One leg of a triangular cycle with the rate used in the calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleLeg {
    pub pair: CurrencyPair,
    pub rate: Decimal,
}

/// Result of comparing a direct rate with the rate implied by two others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangularArbitrageEvent {
    id: EventId,
    timestamp: DateTime<Utc>,
    exchange: ExchangeName,
    direct: TriangleLeg,
    inverted: TriangleLeg,
    bridge: TriangleLeg,
    cross_rate: Decimal,
    fee: Decimal,
    cross_rate_difference: Decimal,
    is_opportunity: bool,
}

impl TriangularArbitrageEvent {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        exchange: ExchangeName,
        direct: TriangleLeg,
        inverted: TriangleLeg,
        bridge: TriangleLeg,
        cross_rate: Decimal,
        fee: Decimal,
        cross_rate_difference: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EventId::new(),
            timestamp,
            exchange,
            direct,
            inverted,
            bridge,
            cross_rate,
            fee,
            cross_rate_difference,
            is_opportunity: cross_rate_difference > Decimal::ZERO,
        }
    }

    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub const fn exchange(&self) -> &ExchangeName {
        &self.exchange
    }

    /// Leg 1: the direct rate being checked.
    #[must_use]
    pub const fn direct(&self) -> &TriangleLeg {
        &self.direct
    }

    /// Leg 2: its rate is already inverted (`1 / price`).
    #[must_use]
    pub const fn inverted(&self) -> &TriangleLeg {
        &self.inverted
    }

    /// Leg 3.
    #[must_use]
    pub const fn bridge(&self) -> &TriangleLeg {
        &self.bridge
    }

    /// Synthetic direct rate composed from legs 2 and 3.
    #[must_use]
    pub const fn cross_rate(&self) -> Decimal {
        self.cross_rate
    }

    #[must_use]
    pub const fn fee(&self) -> Decimal {
        self.fee
    }

    /// Relative divergence of the cross rate, net of three taker fees.
    #[must_use]
    pub const fn cross_rate_difference(&self) -> Decimal {
        self.cross_rate_difference
    }

    #[must_use]
    pub const fn is_opportunity(&self) -> bool {
        self.is_opportunity
    }
}
