//! Single-exchange triangular arbitrage detection.
//!
//! A cycle is three symbols `A/B`, `C/A` and `C/B`. Inverting the middle leg
//! and multiplying by the last composes a synthetic `A/B` rate:
//!
//! ```text
//! cross = (1 / price(C/A)) * price(C/B)
//! diff  = (cross - price(A/B)) / price(A/B) - 3 * fee
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::DetectionError;
use super::{CurrencyPair, PriceSnapshot, TriangleLeg, TriangularArbitrageEvent};

/// The three symbols of a triangular cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangularCycle {
    /// Leg 1, the direct `A/B` rate.
    pub direct: CurrencyPair,
    /// Leg 2, `C/A`, consumed inverted.
    pub inverted: CurrencyPair,
    /// Leg 3, `C/B`.
    pub bridge: CurrencyPair,
}

impl TriangularCycle {
    pub fn new(
        direct: impl Into<CurrencyPair>,
        inverted: impl Into<CurrencyPair>,
        bridge: impl Into<CurrencyPair>,
    ) -> Self {
        Self {
            direct: direct.into(),
            inverted: inverted.into(),
            bridge: bridge.into(),
        }
    }

    fn symbols(&self) -> [&CurrencyPair; 3] {
        [&self.direct, &self.inverted, &self.bridge]
    }
}

impl Default for TriangularCycle {
    /// ETH/BTC checked against LTC/ETH and LTC/BTC.
    fn default() -> Self {
        Self::new("ETHBTC", "LTCETH", "LTCBTC")
    }
}

/// Detect triangular arbitrage on one exchange's snapshot set.
///
/// # Errors
///
/// Returns [`DetectionError::IncompleteCycle`] when any of the cycle's
/// symbols has no snapshot, and [`DetectionError::Arithmetic`] on overflow.
pub fn detect_triangular(
    snapshots: &[PriceSnapshot],
    cycle: &TriangularCycle,
) -> Result<Option<TriangularArbitrageEvent>, DetectionError> {
    detect_triangular_at(snapshots, cycle, Utc::now())
}

/// Same as [`detect_triangular`] with the event stamped at `timestamp`.
///
/// The exchange evaluated is the one quoting the first snapshot; snapshots
/// from any other exchange are ignored. An empty input is `Ok(None)`.
///
/// # Errors
///
/// See [`detect_triangular`].
pub fn detect_triangular_at(
    snapshots: &[PriceSnapshot],
    cycle: &TriangularCycle,
    timestamp: DateTime<Utc>,
) -> Result<Option<TriangularArbitrageEvent>, DetectionError> {
    let Some(first) = snapshots.first() else {
        debug!("No snapshots for triangular detection");
        return Ok(None);
    };
    let exchange = first.exchange();

    let find = |pair: &CurrencyPair| {
        snapshots
            .iter()
            .find(|s| s.exchange() == exchange && s.pair() == pair)
    };

    let (Some(direct), Some(inverted), Some(bridge)) = (
        find(&cycle.direct),
        find(&cycle.inverted),
        find(&cycle.bridge),
    ) else {
        let missing: Vec<CurrencyPair> = cycle
            .symbols()
            .into_iter()
            .filter(|pair| find(*pair).is_none())
            .cloned()
            .collect();
        return Err(DetectionError::IncompleteCycle {
            exchange: exchange.clone(),
            missing,
        });
    };

    let rate_1 = direct.price();
    let rate_inverse_2 = Decimal::ONE
        .checked_div(inverted.price())
        .ok_or(DetectionError::Arithmetic {
            context: "inverting leg 2",
        })?;
    let rate_3 = bridge.price();
    let fee = direct.fee();

    let cross_rate = rate_inverse_2
        .checked_mul(rate_3)
        .ok_or(DetectionError::Arithmetic {
            context: "composing cross rate",
        })?;
    let difference = cross_rate_difference(cross_rate, rate_1, fee).ok_or(
        DetectionError::Arithmetic {
            context: "cross rate difference",
        },
    )?;

    let event = TriangularArbitrageEvent::new(
        exchange.clone(),
        TriangleLeg {
            pair: cycle.direct.clone(),
            rate: rate_1,
        },
        TriangleLeg {
            pair: cycle.inverted.clone(),
            rate: rate_inverse_2,
        },
        TriangleLeg {
            pair: cycle.bridge.clone(),
            rate: rate_3,
        },
        cross_rate,
        fee,
        difference,
        timestamp,
    );

    if event.is_opportunity() {
        info!(
            exchange = %exchange,
            cross_rate = %cross_rate,
            direct_rate = %rate_1,
            difference = %difference,
            "Triangular arbitrage opportunity"
        );
    } else {
        debug!(
            exchange = %exchange,
            cross_rate = %cross_rate,
            direct_rate = %rate_1,
            difference = %difference,
            "Triangular cycle evaluated"
        );
    }

    Ok(Some(event))
}

fn cross_rate_difference(cross_rate: Decimal, direct: Decimal, fee: Decimal) -> Option<Decimal> {
    let fees = fee.checked_mul(Decimal::from(3))?;
    cross_rate
        .checked_sub(direct)?
        .checked_div(direct)?
        .checked_sub(fees)
}
