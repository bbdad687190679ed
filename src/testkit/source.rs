//! Mock [`PriceSource`] implementations for testing.
//!
//! - [`ScriptedSource`]: Replays a queue of scripted responses, then a
//!   fallback. Best for: partial failure, aggregation order, retries across
//!   ticks.
//!
//! - [`SlowSource`]: Sleeps before answering. Best for: per-adapter
//!   timeouts and tick overlap under a paused clock.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{CurrencyPair, ExchangeName, PriceSnapshot};
use crate::error::{Error, ExchangeError};
use crate::port::outbound::PriceSource;

/// One scripted answer to `fetch_prices`.
#[derive(Debug, Clone)]
pub enum Script {
    /// Quote these `(pair, price)` pairs with fresh snapshot ids.
    Quotes(Vec<(String, Decimal)>),
    /// Return an exchange API error.
    Fail(String),
}

// ---------------------------------------------------------------------------
// ScriptedSource
// ---------------------------------------------------------------------------

/// A mock source that pops one [`Script`] per call.
///
/// When the queue is exhausted the fallback script is used for every
/// further call. Snapshots are rebuilt on each call so ids never repeat.
pub struct ScriptedSource {
    exchange: ExchangeName,
    fee: Decimal,
    scripts: Mutex<VecDeque<Script>>,
    fallback: Script,
    calls: Arc<AtomicU32>,
}

impl ScriptedSource {
    /// A source that always quotes the given pairs.
    pub fn quoting(exchange: &str, fee: Decimal, quotes: &[(&str, Decimal)]) -> Self {
        let quotes = quotes
            .iter()
            .map(|(pair, price)| ((*pair).to_string(), *price))
            .collect();
        Self::new(exchange, fee, Script::Quotes(quotes))
    }

    /// A source that always fails.
    pub fn failing(exchange: &str) -> Self {
        Self::new(exchange, Decimal::ZERO, Script::Fail("scripted failure".into()))
    }

    pub fn new(exchange: &str, fee: Decimal, fallback: Script) -> Self {
        Self {
            exchange: ExchangeName::new(exchange),
            fee,
            scripts: Mutex::new(VecDeque::new()),
            fallback,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Answer the first calls with `scripts`, in order.
    pub fn with_scripts(self, scripts: Vec<Script>) -> Self {
        *self.scripts.lock().unwrap() = scripts.into();
        self
    }

    /// Shared call counter.
    pub fn calls(&self) -> Arc<AtomicU32> {
        self.calls.clone()
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, script: Script) -> Result<Vec<PriceSnapshot>, Error> {
        match script {
            Script::Quotes(quotes) => Ok(quotes
                .into_iter()
                .map(|(pair, price)| {
                    PriceSnapshot::try_new(
                        CurrencyPair::new(pair),
                        price,
                        self.fee,
                        self.exchange.clone(),
                    )
                    .expect("valid scripted quote")
                })
                .collect()),
            Script::Fail(message) => Err(ExchangeError::Api {
                exchange: self.exchange.to_string(),
                message,
            }
            .into()),
        }
    }
}

#[async_trait]
impl PriceSource for ScriptedSource {
    async fn fetch_prices(&self) -> Result<Vec<PriceSnapshot>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        self.answer(script)
    }

    fn exchange(&self) -> &ExchangeName {
        &self.exchange
    }
}

// ---------------------------------------------------------------------------
// SlowSource
// ---------------------------------------------------------------------------

/// Wraps a source and sleeps for `delay` before delegating.
pub struct SlowSource<S> {
    inner: S,
    delay: Duration,
}

impl<S: PriceSource> SlowSource<S> {
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl<S: PriceSource> PriceSource for SlowSource<S> {
    async fn fetch_prices(&self) -> Result<Vec<PriceSnapshot>, Error> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch_prices().await
    }

    fn exchange(&self) -> &ExchangeName {
        self.inner.exchange()
    }
}
