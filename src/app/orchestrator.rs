//! Detection cycle orchestration.
//!
//! One tick fetches every source concurrently, aggregates the results in
//! source order, runs both detectors and hands everything to the recorder.
//! Nothing inside a tick is fatal: failed sources contribute no snapshots
//! and failed writes are logged.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use rust_decimal::Decimal;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::config::Config;
use crate::domain::{
    aggregate, detect_pairwise, detect_triangular, link_snapshots, CurrencyPair, DetectionError,
    ExchangeName, PriceSnapshot, TriangularCycle,
};
use crate::error::{ExchangeError, Result};
use crate::port::outbound::{PriceSource, Recorder};

/// What happened to one exchange's triangular check during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TriangularOutcome {
    /// A cross rate was computed.
    Evaluated {
        exchange: ExchangeName,
        difference: Decimal,
        is_opportunity: bool,
    },
    /// One or more legs had no snapshot, so nothing was computed.
    Incomplete {
        exchange: ExchangeName,
        missing: Vec<CurrencyPair>,
    },
    /// The exchange produced no snapshots this tick.
    NoData { exchange: ExchangeName },
    /// The calculation itself failed.
    Failed {
        exchange: ExchangeName,
        error: DetectionError,
    },
}

impl TriangularOutcome {
    #[must_use]
    pub const fn exchange(&self) -> &ExchangeName {
        match self {
            Self::Evaluated { exchange, .. }
            | Self::Incomplete { exchange, .. }
            | Self::NoData { exchange }
            | Self::Failed { exchange, .. } => exchange,
        }
    }

    #[must_use]
    pub const fn is_opportunity(&self) -> bool {
        matches!(
            self,
            Self::Evaluated {
                is_opportunity: true,
                ..
            }
        )
    }
}

/// Summary of one detection tick.
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// Snapshots aggregated across all sources.
    pub snapshots: usize,
    /// Sources that returned nothing, failed or timed out.
    pub failed_sources: Vec<ExchangeName>,
    /// Pairwise events produced, opportunities or not.
    pub pairwise_events: usize,
    /// Pairwise events flagged as opportunities.
    pub opportunities: usize,
    pub triangular: Vec<TriangularOutcome>,
    /// Recorder calls that returned an error.
    pub recorder_failures: usize,
}

/// Drives detection ticks over a fixed set of sources and one recorder.
pub struct Orchestrator {
    sources: Vec<Arc<dyn PriceSource>>,
    recorder: Arc<dyn Recorder>,
    triangular_exchanges: Vec<ExchangeName>,
    cycle: TriangularCycle,
    interval: Duration,
    adapter_timeout: Duration,
}

impl Orchestrator {
    /// Create an orchestrator with default timing and no triangular checks.
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn PriceSource>>, recorder: Arc<dyn Recorder>) -> Self {
        Self {
            sources,
            recorder,
            triangular_exchanges: Vec::new(),
            cycle: TriangularCycle::default(),
            interval: Duration::from_secs(5),
            adapter_timeout: Duration::from_secs(4),
        }
    }

    /// Create an orchestrator with timing and triangular settings from config.
    #[must_use]
    pub fn from_config(
        config: &Config,
        sources: Vec<Arc<dyn PriceSource>>,
        recorder: Arc<dyn Recorder>,
    ) -> Self {
        let exchanges = config
            .triangular
            .exchanges
            .iter()
            .map(|exchange| ExchangeName::new(exchange.display_name()))
            .collect();

        Self::new(sources, recorder)
            .with_interval(config.scheduler.interval())
            .with_adapter_timeout(config.scheduler.adapter_timeout())
            .with_triangular(exchanges, config.triangular.cycle())
    }

    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub const fn with_adapter_timeout(mut self, timeout: Duration) -> Self {
        self.adapter_timeout = timeout;
        self
    }

    /// Run triangular detection for each named exchange.
    #[must_use]
    pub fn with_triangular(mut self, exchanges: Vec<ExchangeName>, cycle: TriangularCycle) -> Self {
        self.triangular_exchanges = exchanges;
        self.cycle = cycle;
        self
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one tick: fetch, aggregate, detect, record.
    pub async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport::default();

        let fetched = self.fetch_all().await;
        for (exchange, result) in &fetched {
            if result.is_none() {
                report.failed_sources.push(exchange.clone());
            }
        }
        let snapshots = aggregate(fetched.into_iter().map(|(_, result)| result));
        report.snapshots = snapshots.len();

        let events = detect_pairwise(&snapshots);
        report.pairwise_events = events.len();
        report.opportunities = events.iter().filter(|e| e.is_opportunity()).count();
        let linked = link_snapshots(&snapshots, &events);

        if let Err(e) = self.recorder.record_pairwise_events(&events).await {
            warn!(recorder = self.recorder.name(), error = %e, "Failed to record pairwise events");
            report.recorder_failures += 1;
        }
        if let Err(e) = self.recorder.record_snapshots(&linked).await {
            warn!(recorder = self.recorder.name(), error = %e, "Failed to record snapshots");
            report.recorder_failures += 1;
        }

        for exchange in &self.triangular_exchanges {
            let outcome = self.run_triangular(exchange, &snapshots, &mut report).await;
            report.triangular.push(outcome);
        }

        info!(
            snapshots = report.snapshots,
            failed_sources = report.failed_sources.len(),
            pairwise_events = report.pairwise_events,
            opportunities = report.opportunities,
            triangular_opportunities = report.triangular.iter().filter(|t| t.is_opportunity()).count(),
            recorder_failures = report.recorder_failures,
            "Cycle complete"
        );
        report
    }

    /// Tick until `shutdown` flips to true or its sender is dropped.
    ///
    /// A tick in progress always completes before the loop exits. Ticks
    /// missed while a slow cycle runs are skipped, never queued.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` leaves room for startup checks.
    pub async fn run_with_shutdown(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        info!(
            sources = self.sources.len(),
            recorder = self.recorder.name(),
            interval_secs = self.interval.as_secs_f64(),
            "Starting detection loop"
        );

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            if *shutdown.borrow() {
                info!("Shutdown signal received");
                break;
            }
            tokio::select! {
                result = shutdown.changed() => {
                    match result {
                        Ok(()) => {
                            if *shutdown.borrow() {
                                info!("Shutdown signal received");
                                break;
                            }
                        }
                        Err(_) => {
                            info!("Shutdown channel closed");
                            break;
                        }
                    }
                }
                _ = interval.tick() => {
                    self.run_cycle().await;
                }
            }
        }

        info!("Detection loop stopped");
        Ok(())
    }

    /// Fetch every source concurrently, keeping source order.
    async fn fetch_all(&self) -> Vec<(ExchangeName, Option<Vec<PriceSnapshot>>)> {
        let timeout = self.adapter_timeout;
        let fetches = self.sources.iter().map(|source| async move {
            let exchange = source.exchange().clone();
            let result = match tokio::time::timeout(timeout, source.fetch_prices()).await {
                Ok(Ok(snapshots)) if snapshots.is_empty() => {
                    warn!(exchange = %exchange, "Source returned no prices");
                    None
                }
                Ok(Ok(snapshots)) => {
                    debug!(exchange = %exchange, count = snapshots.len(), "Source fetched");
                    Some(snapshots)
                }
                Ok(Err(e)) => {
                    warn!(exchange = %exchange, error = %e, "Price fetch failed");
                    None
                }
                Err(_) => {
                    let e = ExchangeError::Timeout {
                        exchange: exchange.to_string(),
                        timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    };
                    warn!(error = %e, "Price fetch timed out");
                    None
                }
            };
            (exchange, result)
        });
        join_all(fetches).await
    }

    async fn run_triangular(
        &self,
        exchange: &ExchangeName,
        snapshots: &[PriceSnapshot],
        report: &mut CycleReport,
    ) -> TriangularOutcome {
        let own: Vec<PriceSnapshot> = snapshots
            .iter()
            .filter(|s| s.exchange().matches(exchange.as_str()))
            .cloned()
            .collect();

        match detect_triangular(&own, &self.cycle) {
            Ok(Some(event)) => {
                if let Err(e) = self.recorder.record_triangular_event(&event).await {
                    warn!(recorder = self.recorder.name(), error = %e, "Failed to record triangular event");
                    report.recorder_failures += 1;
                }
                TriangularOutcome::Evaluated {
                    exchange: exchange.clone(),
                    difference: event.cross_rate_difference(),
                    is_opportunity: event.is_opportunity(),
                }
            }
            Ok(None) => {
                debug!(exchange = %exchange, "No snapshots for triangular check");
                TriangularOutcome::NoData {
                    exchange: exchange.clone(),
                }
            }
            Err(DetectionError::IncompleteCycle { missing, .. }) => {
                warn!(exchange = %exchange, missing = ?missing, "Incomplete triangular cycle");
                TriangularOutcome::Incomplete {
                    exchange: exchange.clone(),
                    missing,
                }
            }
            Err(error) => {
                warn!(exchange = %exchange, error = %error, "Triangular check failed");
                TriangularOutcome::Failed {
                    exchange: exchange.clone(),
                    error,
                }
            }
        }
    }
}
