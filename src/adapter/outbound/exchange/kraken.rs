//! Kraken public ticker adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use super::http::{decode, get_text};
use super::snapshot_from_quote;
use crate::domain::{ExchangeName, PriceSnapshot};
use crate::error::{ExchangeError, Result};
use crate::port::outbound::PriceSource;

/// Kraken asset pair names and the symbols they are reported as.
pub const PAIRS: [(&str, &str); 3] = [
    ("XBTUSDT", "BTCUSD"),
    ("XETHZUSD", "ETHUSD"),
    ("XLTCZUSD", "LTCUSD"),
];

#[derive(Debug, Deserialize)]
struct TickerResponse {
    #[serde(default)]
    error: Vec<String>,
    #[serde(default)]
    result: HashMap<String, TickerInfo>,
}

#[derive(Debug, Deserialize)]
struct TickerInfo {
    /// Ask as `[price, whole lot volume, lot volume]`.
    a: Vec<String>,
}

pub struct KrakenAdapter {
    http: HttpClient,
    base_url: String,
    fee: Decimal,
    name: ExchangeName,
}

impl KrakenAdapter {
    #[must_use]
    pub fn new(http: HttpClient, base_url: impl Into<String>, fee: Decimal) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            fee,
            name: ExchangeName::new("Kraken"),
        }
    }

    fn ticker_url(&self) -> String {
        let pairs: Vec<&str> = PAIRS.iter().map(|(kraken, _)| *kraken).collect();
        format!("{}/0/public/Ticker?pair={}", self.base_url, pairs.join(","))
    }
}

/// Parse a `Ticker` body using the ask price of each known pair.
fn parse_ticker(name: &ExchangeName, fee: Decimal, body: &str) -> Result<Vec<PriceSnapshot>> {
    let response: TickerResponse = decode(body)?;
    if !response.error.is_empty() {
        return Err(ExchangeError::Api {
            exchange: name.to_string(),
            message: response.error.join("; "),
        }
        .into());
    }

    let mut snapshots = Vec::with_capacity(PAIRS.len());
    for (kraken_pair, symbol) in PAIRS {
        let Some(info) = response.result.get(kraken_pair) else {
            warn!(exchange = %name, pair = kraken_pair, "Pair missing from ticker");
            continue;
        };
        let Some(ask) = info.a.first() else {
            warn!(exchange = %name, pair = kraken_pair, "Ticker has no ask price");
            continue;
        };
        if let Some(snapshot) = snapshot_from_quote(name, fee, symbol, ask) {
            snapshots.push(snapshot);
        }
    }
    Ok(snapshots)
}

#[async_trait]
impl PriceSource for KrakenAdapter {
    async fn fetch_prices(&self) -> Result<Vec<PriceSnapshot>> {
        let body = get_text(&self.http, &self.ticker_url()).await?;
        let snapshots = parse_ticker(&self.name, self.fee, &body)?;

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
