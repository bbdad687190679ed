//! Exchange port for spot price sampling.

use async_trait::async_trait;

use crate::domain::{ExchangeName, PriceSnapshot};
use crate::error::Error;

/// A venue that can report its current spot prices.
///
/// Implementations may return a partial list when some pairs fail to
/// parse. A total failure is an `Err`; the orchestrator treats it the same
/// as an empty list and keeps going.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the latest price for every pair this exchange tracks.
    async fn fetch_prices(&self) -> Result<Vec<PriceSnapshot>, Error>;

    /// Display name used on snapshots and in logs.
    fn exchange(&self) -> &ExchangeName;
}
