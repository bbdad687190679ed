//! Coinbase Exchange ticker adapter.
//!
//! Coinbase has no batch ticker endpoint, so each product is requested on
//! its own. A failing product is skipped; the adapter only fails when every
//! product fails.

use async_trait::async_trait;
use futures_util::future::join_all;
use reqwest::Client as HttpClient;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use super::http::{decode, get_text};
use super::snapshot_from_quote;
use crate::domain::{ExchangeName, PriceSnapshot};
use crate::error::{ExchangeError, Result};
use crate::port::outbound::PriceSource;

/// Products sampled on every tick.
pub const PRODUCTS: [&str; 5] = ["BTC-USD", "ETH-USD", "LTC-USD", "ETH-BTC", "LTC-BTC"];

#[derive(Debug, Deserialize)]
struct Ticker {
    price: String,
}

pub struct CoinbaseAdapter {
    http: HttpClient,
    base_url: String,
    fee: Decimal,
    name: ExchangeName,
}

impl CoinbaseAdapter {
    #[must_use]
    pub fn new(http: HttpClient, base_url: impl Into<String>, fee: Decimal) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            fee,
            name: ExchangeName::new("Coinbase"),
        }
    }

    async fn fetch_product(&self, product: &str) -> Result<Option<PriceSnapshot>> {
        let url = format!("{}/products/{product}/ticker", self.base_url);
        let body = get_text(&self.http, &url).await?;
        parse_ticker(&self.name, self.fee, product, &body)
    }
}

/// Parse one `/products/{id}/ticker` body.
fn parse_ticker(
    name: &ExchangeName,
    fee: Decimal,
    product: &str,
    body: &str,
) -> Result<Option<PriceSnapshot>> {
    let ticker: Ticker = decode(body)?;
    Ok(snapshot_from_quote(name, fee, product, &ticker.price))
}

#[async_trait]
impl PriceSource for CoinbaseAdapter {
    async fn fetch_prices(&self) -> Result<Vec<PriceSnapshot>> {
        let results = join_all(PRODUCTS.iter().map(|product| self.fetch_product(product))).await;

        let mut snapshots = Vec::with_capacity(PRODUCTS.len());
        for (product, result) in PRODUCTS.iter().zip(results) {
            match result {
                Ok(Some(snapshot)) => snapshots.push(snapshot),
                Ok(None) => {}
                Err(e) => warn!(exchange = %self.name, product, error = %e, "Ticker fetch failed"),
            }
        }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    const TICKER: &str = r#"{
        "ask": "26010.45",
        "bid": "26010.44",
        "volume": "12345.6789",
        "trade_id": 557236091,
        "price": "26010.44",
        "size": "0.00101",
        "time": "2023-09-14T18:21:07.102123Z"
    }"#;

    #[test]
    fn parses_ticker_price_and_normalises_product() {
        let name = ExchangeName::new("Coinbase");

        let snapshot = parse_ticker(&name, dec!(0.006), "BTC-USD", TICKER)
            .unwrap()
            .unwrap();

        assert_eq!(snapshot.pair().as_str(), "BTCUSD");
        assert_eq!(snapshot.price(), dec!(26010.44));
        assert_eq!(snapshot.fee(), dec!(0.006));
        assert_eq!(snapshot.exchange().as_str(), "Coinbase");
    }

    #[test]
    fn error_body_is_a_decode_error() {
        let name = ExchangeName::new("Coinbase");

        let result = parse_ticker(&name, dec!(0.006), "BTC-USD", r#"{"message":"NotFound"}"#);

        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn unparseable_price_is_skipped() {
        let name = ExchangeName::new("Coinbase");

        let result = parse_ticker(&name, dec!(0.006), "ETH-BTC", r#"{"price":""}"#).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn adapter_reports_its_name() {
        let adapter = CoinbaseAdapter::new(HttpClient::new(), "http://localhost", dec!(0.006));
        assert_eq!(adapter.exchange().as_str(), "Coinbase");
    }
}
