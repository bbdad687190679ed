//! Mock [`Recorder`] implementations for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{PairwiseArbitrageEvent, PriceSnapshot, TriangularArbitrageEvent};
use crate::error::{Error, Result};
use crate::port::outbound::Recorder;

/// Keeps every recorded entity in memory, in call order.
#[derive(Default)]
pub struct RecordingRecorder {
    snapshots: Mutex<Vec<PriceSnapshot>>,
    pairwise: Mutex<Vec<PairwiseArbitrageEvent>>,
    triangular: Mutex<Vec<TriangularArbitrageEvent>>,
    /// One entry per call: "snapshots", "pairwise" or "triangular".
    calls: Mutex<Vec<&'static str>>,
}

impl RecordingRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> Vec<PriceSnapshot> {
        self.snapshots.lock().unwrap().clone()
    }

    pub fn pairwise_events(&self) -> Vec<PairwiseArbitrageEvent> {
        self.pairwise.lock().unwrap().clone()
    }

    pub fn triangular_events(&self) -> Vec<TriangularArbitrageEvent> {
        self.triangular.lock().unwrap().clone()
    }

    /// Names of recorder calls, in the order they were made.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Recorder for RecordingRecorder {
    async fn record_snapshots(&self, snapshots: &[PriceSnapshot]) -> Result<()> {
        self.calls.lock().unwrap().push("snapshots");
        self.snapshots.lock().unwrap().extend_from_slice(snapshots);
        Ok(())
    }

    async fn record_pairwise_events(&self, events: &[PairwiseArbitrageEvent]) -> Result<()> {
        self.calls.lock().unwrap().push("pairwise");
        self.pairwise.lock().unwrap().extend_from_slice(events);
        Ok(())
    }

    async fn record_triangular_event(&self, event: &TriangularArbitrageEvent) -> Result<()> {
        self.calls.lock().unwrap().push("triangular");
        self.triangular.lock().unwrap().push(event.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Fails every call with a database error.
#[derive(Default)]
pub struct FailingRecorder {
    attempts: AtomicU32,
}

impl FailingRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    fn fail(&self) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(Error::Database("disk I/O error".into()))
    }
}

#[async_trait]
impl Recorder for FailingRecorder {
    async fn record_snapshots(&self, _: &[PriceSnapshot]) -> Result<()> {
        self.fail()
    }

    async fn record_pairwise_events(&self, _: &[PairwiseArbitrageEvent]) -> Result<()> {
        self.fail()
    }

    async fn record_triangular_event(&self, _: &TriangularArbitrageEvent) -> Result<()> {
        self.fail()
    }

    async fn health_check(&self) -> Result<()> {
        self.fail()
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
