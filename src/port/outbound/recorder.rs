//! Persistence port for snapshots and detected events.

use async_trait::async_trait;

use crate::domain::{PairwiseArbitrageEvent, PriceSnapshot, TriangularArbitrageEvent};
use crate::error::Result;

/// Sink for everything a detection cycle produces.
///
/// Every method may fail; the orchestrator logs failures and moves on.
#[async_trait]
pub trait Recorder: Send + Sync {
    /// Persist a batch of price snapshots.
    async fn record_snapshots(&self, snapshots: &[PriceSnapshot]) -> Result<()>;

    /// Persist a batch of pairwise events, opportunities or not.
    async fn record_pairwise_events(&self, events: &[PairwiseArbitrageEvent]) -> Result<()>;

    /// Persist one triangular evaluation.
    async fn record_triangular_event(&self, event: &TriangularArbitrageEvent) -> Result<()>;

    /// Verify the backing store accepts writes.
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    /// Recorder name for logging.
    fn name(&self) -> &'static str;
}
