//! Spot price adapters for public exchange REST APIs.
//!
//! Each adapter turns one venue's ticker format into [`PriceSnapshot`]s
//! stamped with that venue's taker fee. Parsing is split from I/O so the
//! response formats can be tested on captured bodies.

mod coinbase;
mod gemini;
pub mod http;
mod kraken;

use std::sync::Arc;

use reqwest::Client as HttpClient;
use rust_decimal::Decimal;
use tracing::warn;

pub use coinbase::CoinbaseAdapter;
pub use gemini::GeminiAdapter;
pub use kraken::KrakenAdapter;

use crate::app::config::{Exchange, ExchangesConfig};
use crate::domain::{CurrencyPair, ExchangeName, PriceSnapshot};
use crate::port::outbound::PriceSource;

/// Build the adapter for `exchange` over the shared client.
#[must_use]
pub fn create_source(
    exchange: Exchange,
    http: &HttpClient,
    config: &ExchangesConfig,
) -> Arc<dyn PriceSource> {
    let base_url = config.base_url(exchange);
    let fee = config.taker_fee(exchange);
    match exchange {
        Exchange::Coinbase => Arc::new(CoinbaseAdapter::new(http.clone(), base_url, fee)),
        Exchange::Gemini => Arc::new(GeminiAdapter::new(http.clone(), base_url, fee)),
        Exchange::Kraken => Arc::new(KrakenAdapter::new(http.clone(), base_url, fee)),
    }
}

/// Build adapters for every enabled exchange, in configured order.
#[must_use]
pub fn create_sources(http: &HttpClient, config: &ExchangesConfig) -> Vec<Arc<dyn PriceSource>> {
    config
        .enabled
        .iter()
        .map(|exchange| create_source(*exchange, http, config))
        .collect()
}

/// Turn one quoted price string into a snapshot, or skip it with a warning.
fn snapshot_from_quote(
    exchange: &ExchangeName,
    fee: Decimal,
    symbol: &str,
    raw_price: &str,
) -> Option<PriceSnapshot> {
    let price = match raw_price.trim().parse::<Decimal>() {
        Ok(price) => price,
        Err(e) => {
            warn!(exchange = %exchange, symbol, price = raw_price, error = %e, "Unparseable price");
            return None;
        }
    };

    match PriceSnapshot::try_new(CurrencyPair::new(symbol), price, fee, exchange.clone()) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(exchange = %exchange, symbol, error = %e, "Rejected quote");
            None
        }
    }
}
