//! Log-only recorder.
//!
//! Used when persistence is disabled. Opportunities are logged at `info`,
//! everything else at `debug`.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{PairwiseArbitrageEvent, PriceSnapshot, TriangularArbitrageEvent};
use crate::error::Result;
use crate::port::outbound::Recorder;

/// A recorder that writes results to the tracing subscriber only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRecorder;

#[async_trait]
impl Recorder for LogRecorder {
    async fn record_snapshots(&self, snapshots: &[PriceSnapshot]) -> Result<()> {
        for snapshot in snapshots {
            debug!(
                pair = %snapshot.pair(),
                exchange = %snapshot.exchange(),
                price = %snapshot.price(),
                opportunity = snapshot.is_opportunity(),
                "Price snapshot"
            );
        }
        Ok(())
    }

    async fn record_pairwise_events(&self, events: &[PairwiseArbitrageEvent]) -> Result<()> {
        for event in events {
            if event.is_opportunity() {
                info!(
                    pair = %event.pair(),
                    exchange_a = %event.leg_a().exchange(),
                    price_a = %event.leg_a().price(),
                    exchange_b = %event.leg_b().exchange(),
                    price_b = %event.leg_b().price(),
                    profit_pct = %event.projected_profit(),
                    "Arbitrage opportunity"
                );
            } else {
                debug!(
                    pair = %event.pair(),
                    exchange_a = %event.leg_a().exchange(),
                    exchange_b = %event.leg_b().exchange(),
                    profit_pct = %event.projected_profit(),
                    "No arbitrage"
                );
            }
        }
        Ok(())
    }

    async fn record_triangular_event(&self, event: &TriangularArbitrageEvent) -> Result<()> {
        if event.is_opportunity() {
            info!(
                exchange = %event.exchange(),
                direct = %event.direct().pair,
                cross_rate = %event.cross_rate(),
                difference = %event.cross_rate_difference(),
                "Triangular arbitrage opportunity"
            );
        } else {
            debug!(
                exchange = %event.exchange(),
                difference = %event.cross_rate_difference(),
                "No triangular arbitrage"
            );
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
