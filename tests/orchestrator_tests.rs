mod support;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use arbhunter::app::{Orchestrator, TriangularOutcome};
use arbhunter::domain::{CurrencyPair, DetectionError, ExchangeName, TriangularCycle};
use arbhunter::port::outbound::{PriceSource, Recorder};
use arbhunter::testkit::recorder::{FailingRecorder, RecordingRecorder};
use arbhunter::testkit::source::{Script, ScriptedSource, SlowSource};
use rust_decimal_macros::dec;
use support::assertions::assert_close;
use tokio::sync::watch;

fn source(source: ScriptedSource) -> Arc<dyn PriceSource> {
    Arc::new(source)
}

fn btc(exchange: &str, price: rust_decimal::Decimal, fee: rust_decimal::Decimal) -> Arc<dyn PriceSource> {
    source(ScriptedSource::quoting(exchange, fee, &[("BTCUSD", price)]))
}

fn gemini_triangle() -> ScriptedSource {
    ScriptedSource::quoting(
        "Gemini",
        dec!(0),
        &[
            ("BTCUSD", dec!(25500)),
            ("ETHBTC", dec!(0.06)),
            ("LTCETH", dec!(0.04776)),
            ("LTCBTC", dec!(0.003144)),
        ],
    )
}

fn with_gemini_triangle(orchestrator: Orchestrator) -> Orchestrator {
    orchestrator.with_triangular(vec![ExchangeName::new("Gemini")], TriangularCycle::default())
}

#[tokio::test]
async fn cycle_detects_records_and_links() {
    let recorder = Arc::new(RecordingRecorder::new());
    let orchestrator = Orchestrator::new(
        vec![
            btc("A", dec!(25000), dec!(0.002)),
            btc("B", dec!(26000), dec!(0.004)),
        ],
        recorder.clone(),
    );

    let report = orchestrator.run_cycle().await;

    assert_eq!(report.snapshots, 2);
    assert_eq!(report.pairwise_events, 1);
    assert_eq!(report.opportunities, 1);
    assert!(report.failed_sources.is_empty());
    assert_eq!(report.recorder_failures, 0);

    assert_eq!(recorder.calls(), vec!["pairwise", "snapshots"]);
    let events = recorder.pairwise_events();
    assert_close(events[0].projected_profit(), dec!(3.3176470588));
    let snapshots = recorder.snapshots();
    assert_eq!(snapshots.len(), 2);
    assert!(snapshots
        .iter()
        .all(|s| s.arbitrage_event() == Some(events[0].id())));
}

#[tokio::test]
async fn aggregation_follows_source_order() {
    let recorder = Arc::new(RecordingRecorder::new());
    let orchestrator = Orchestrator::new(
        vec![
            btc("C", dec!(23050), dec!(0.003)),
            btc("A", dec!(23000), dec!(0.002)),
            btc("B", dec!(24500), dec!(0.004)),
        ],
        recorder.clone(),
    );

    orchestrator.run_cycle().await;

    let exchanges: Vec<String> = recorder
        .snapshots()
        .iter()
        .map(|s| s.exchange().to_string())
        .collect();
    assert_eq!(exchanges, vec!["C", "A", "B"]);
    let legs: Vec<(String, String)> = recorder
        .pairwise_events()
        .iter()
        .map(|e| (e.leg_a().exchange().to_string(), e.leg_b().exchange().to_string()))
        .collect();
    assert_eq!(
        legs,
        vec![
            ("C".to_string(), "A".to_string()),
            ("C".to_string(), "B".to_string()),
            ("A".to_string(), "B".to_string()),
        ]
    );
}

#[tokio::test]
async fn failed_source_contributes_nothing() {
    let recorder = Arc::new(RecordingRecorder::new());
    let orchestrator = Orchestrator::new(
        vec![
            btc("A", dec!(25000), dec!(0.002)),
            source(ScriptedSource::failing("B")),
            btc("C", dec!(26000), dec!(0.004)),
        ],
        recorder.clone(),
    );

    let report = orchestrator.run_cycle().await;

    assert_eq!(report.failed_sources, vec![ExchangeName::new("B")]);
    assert_eq!(report.snapshots, 2);
    assert_eq!(report.pairwise_events, 1);
    assert_eq!(recorder.snapshots().len(), 2);
}

#[tokio::test]
async fn source_recovers_on_next_cycle() {
    let flaky = ScriptedSource::quoting("B", dec!(0.004), &[("BTCUSD", dec!(26000))])
        .with_scripts(vec![Script::Fail("502 Bad Gateway".into())]);
    let recorder = Arc::new(RecordingRecorder::new());
    let orchestrator = Orchestrator::new(
        vec![btc("A", dec!(25000), dec!(0.002)), source(flaky)],
        recorder.clone(),
    );

    let first = orchestrator.run_cycle().await;
    let second = orchestrator.run_cycle().await;

    assert_eq!(first.failed_sources.len(), 1);
    assert_eq!(first.pairwise_events, 0);
    assert!(second.failed_sources.is_empty());
    assert_eq!(second.pairwise_events, 1);
    assert_eq!(recorder.snapshots().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn slow_source_times_out_without_stalling_the_cycle() {
    let slow = SlowSource::new(
        ScriptedSource::quoting("Slow", dec!(0.002), &[("BTCUSD", dec!(25500))]),
        Duration::from_secs(30),
    );
    let recorder = Arc::new(RecordingRecorder::new());
    let orchestrator = Orchestrator::new(
        vec![
            btc("A", dec!(25000), dec!(0.002)),
            Arc::new(slow),
            btc("B", dec!(26000), dec!(0.004)),
        ],
        recorder.clone(),
    )
    .with_adapter_timeout(Duration::from_secs(2));

    let started = tokio::time::Instant::now();
    let report = orchestrator.run_cycle().await;

    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(report.failed_sources, vec![ExchangeName::new("Slow")]);
    assert_eq!(report.snapshots, 2);
    assert_eq!(report.opportunities, 1);
}

#[tokio::test]
async fn recorder_failures_are_counted_not_fatal() {
    let recorder = Arc::new(FailingRecorder::new());
    let orchestrator = with_gemini_triangle(Orchestrator::new(
        vec![btc("A", dec!(25000), dec!(0.002)), source(gemini_triangle())],
        recorder.clone(),
    ));

    let report = orchestrator.run_cycle().await;

    assert_eq!(report.recorder_failures, 3);
    assert_eq!(recorder.attempts(), 3);
    assert_eq!(report.opportunities, 1);
    assert!(report.triangular[0].is_opportunity());
}

#[tokio::test]
async fn triangular_runs_per_configured_exchange() {
    let other = ScriptedSource::quoting(
        "Kraken",
        dec!(0.0026),
        &[("ETHBTC", dec!(0.5)), ("LTCETH", dec!(0.5)), ("LTCBTC", dec!(0.5))],
    );
    let recorder = Arc::new(RecordingRecorder::new());
    let orchestrator = with_gemini_triangle(Orchestrator::new(
        vec![source(other), source(gemini_triangle())],
        recorder.clone(),
    ));

    let report = orchestrator.run_cycle().await;

    assert_eq!(report.triangular.len(), 1);
    match &report.triangular[0] {
        TriangularOutcome::Evaluated {
            exchange,
            difference,
            is_opportunity,
        } => {
            assert_eq!(exchange.as_str(), "Gemini");
            assert_close(*difference, dec!(0.09715243));
            assert!(is_opportunity);
        }
        other => panic!("expected evaluation, got {other:?}"),
    }
    let recorded = recorder.triangular_events();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].exchange().as_str(), "Gemini");
}

#[tokio::test]
async fn incomplete_triangle_is_reported_not_recorded() {
    let partial = ScriptedSource::quoting("Gemini", dec!(0.004), &[("ETHBTC", dec!(0.06))]);
    let recorder = Arc::new(RecordingRecorder::new());
    let orchestrator =
        with_gemini_triangle(Orchestrator::new(vec![source(partial)], recorder.clone()));

    let report = orchestrator.run_cycle().await;

    assert_eq!(
        report.triangular,
        vec![TriangularOutcome::Incomplete {
            exchange: ExchangeName::new("Gemini"),
            missing: vec![CurrencyPair::new("LTCETH"), CurrencyPair::new("LTCBTC")],
        }]
    );
    assert!(recorder.triangular_events().is_empty());
}

#[tokio::test]
async fn overflowing_triangle_reports_detection_error() {
    let extreme = ScriptedSource::quoting(
        "Gemini",
        dec!(0.004),
        &[
            ("ETHBTC", dec!(0.06)),
            ("LTCETH", dec!(0.00000000000000000001)),
            ("LTCBTC", dec!(10000000000)),
        ],
    );
    let recorder = Arc::new(RecordingRecorder::new());
    let orchestrator =
        with_gemini_triangle(Orchestrator::new(vec![source(extreme)], recorder.clone()));

    let report = orchestrator.run_cycle().await;

    assert_eq!(
        report.triangular,
        vec![TriangularOutcome::Failed {
            exchange: ExchangeName::new("Gemini"),
            error: DetectionError::Arithmetic {
                context: "composing cross rate",
            },
        }]
    );
    assert!(!report.triangular[0].is_opportunity());
    assert!(recorder.triangular_events().is_empty());
}

#[tokio::test]
async fn triangle_without_data_is_skipped() {
    let recorder = Arc::new(RecordingRecorder::new());
    let orchestrator = with_gemini_triangle(Orchestrator::new(
        vec![source(ScriptedSource::failing("Gemini"))],
        recorder.clone(),
    ));

    let report = orchestrator.run_cycle().await;

    assert_eq!(
        report.triangular,
        vec![TriangularOutcome::NoData {
            exchange: ExchangeName::new("Gemini"),
        }]
    );
    assert_eq!(report.snapshots, 0);
    assert!(recorder.triangular_events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn loop_ticks_on_interval_until_shutdown() {
    let scripted = ScriptedSource::quoting("A", dec!(0.002), &[("BTCUSD", dec!(25000))]);
    let calls = scripted.calls();
    let recorder: Arc<dyn Recorder> = Arc::new(RecordingRecorder::new());
    let orchestrator = Arc::new(
        Orchestrator::new(vec![source(scripted)], recorder).with_interval(Duration::from_secs(5)),
    );
    let (tx, rx) = watch::channel(false);

    let handle = tokio::spawn({
        let orchestrator = orchestrator.clone();
        async move { orchestrator.run_with_shutdown(rx).await }
    });

    tokio::time::sleep(Duration::from_secs(12)).await;
    tx.send(true).unwrap();
    handle.await.unwrap().unwrap();

    // Ticks at 0s, 5s and 10s.
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn in_flight_cycle_finishes_before_shutdown() {
    let scripted = ScriptedSource::quoting("A", dec!(0.002), &[("BTCUSD", dec!(25000))]);
    let calls = scripted.calls();
    let slow = SlowSource::new(scripted, Duration::from_secs(3));
    let recorder = Arc::new(RecordingRecorder::new());
    let orchestrator = Arc::new(
        Orchestrator::new(vec![Arc::new(slow)], recorder.clone())
            .with_interval(Duration::from_secs(5))
            .with_adapter_timeout(Duration::from_secs(10)),
    );
    let (tx, rx) = watch::channel(false);

    let handle = tokio::spawn({
        let orchestrator = orchestrator.clone();
        async move { orchestrator.run_with_shutdown(rx).await }
    });

    tokio::time::sleep(Duration::from_secs(1)).await;
    tx.send(true).unwrap();
    handle.await.unwrap().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(recorder.snapshots().len(), 1);
}

#[tokio::test]
async fn dropped_sender_stops_the_loop() {
    let recorder: Arc<dyn Recorder> = Arc::new(RecordingRecorder::new());
    let orchestrator = Orchestrator::new(Vec::new(), recorder);
    let (tx, rx) = watch::channel(false);
    drop(tx);

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        orchestrator.run_with_shutdown(rx),
    )
    .await;

    assert!(matches!(result, Ok(Ok(()))));
}
