//! Gemini price feed adapter.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use super::http::{decode, get_text};
use super::snapshot_from_quote;
use crate::domain::{ExchangeName, PriceSnapshot};
use crate::error::{ExchangeError, Result};
use crate::port::outbound::PriceSource;

/// Pairs kept from the feed; everything else is dropped.
pub const TRACKED_PAIRS: [&str; 6] = ["BTCUSD", "ETHUSD", "LTCUSD", "ETHBTC", "LTCBTC", "LTCETH"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedEntry {
    pair: String,
    price: String,
}

/// Reads `/v1/pricefeed`, which quotes every listed pair in one call.
pub struct GeminiAdapter {
    http: HttpClient,
    base_url: String,
    fee: Decimal,
    name: ExchangeName,
}

impl GeminiAdapter {
    #[must_use]
    pub fn new(http: HttpClient, base_url: impl Into<String>, fee: Decimal) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            fee,
            name: ExchangeName::new("Gemini"),
        }
    }
}

/// Parse a price feed body, keeping tracked pairs in feed order.
fn parse_pricefeed(name: &ExchangeName, fee: Decimal, body: &str) -> Result<Vec<PriceSnapshot>> {
    let feed: Vec<FeedEntry> = decode(body)?;
    Ok(feed
        .iter()
        .filter(|entry| TRACKED_PAIRS.contains(&entry.pair.to_ascii_uppercase().as_str()))
        .filter_map(|entry| snapshot_from_quote(name, fee, &entry.pair, &entry.price))
        .collect())
}

#[async_trait]
impl PriceSource for GeminiAdapter {
    async fn fetch_prices(&self) -> Result<Vec<PriceSnapshot>> {
        let url = format!("{}/v1/pricefeed", self.base_url);
        let body = get_text(&self.http, &url).await?;
        let snapshots = parse_pricefeed(&self.name, self.fee, &body)?;

        if snapshots.is_empty() {
            return Err(ExchangeError::NoPrices {
                exchange: self.name.to_string(),
            }
            .into());
        }

        debug!(exchange = %self.name, count = snapshots.len(), "Fetched prices");
        Ok(snapshots)
    }

    fn exchange(&self) -> &ExchangeName {
        &self.name
    }
}
