//! Handler for the `run` command.

use tokio::sync::watch;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{banner, config, output};
use crate::app::{App, Config, CycleReport, RunOptions, TriangularOutcome};
use crate::error::Result;

/// Execute the run command.
pub async fn execute(args: &RunArgs, shutdown: watch::Receiver<bool>) -> Result<()> {
    let config = config::load(&args.config)?;
    let options = RunOptions {
        no_db: args.no_db,
        interval_secs: args.interval,
    };

    if !args.no_banner && !args.once && !output::is_json() && !output::is_quiet() {
        banner::print_banner();
    }
    print_startup(&config, args);

    if args.once {
        let report = App::run_once(&config, &options).await?;
        print_report(&report);
        return Ok(());
    }

    App::run_with_shutdown(&config, &options, shutdown).await
}

fn print_startup(config: &Config, args: &RunArgs) {
    let exchanges: Vec<String> = config
        .exchanges
        .enabled
        .iter()
        .map(ToString::to_string)
        .collect();
    let recorder = if args.no_db || !config.database.enabled {
        "log".to_string()
    } else {
        config.database.path.display().to_string()
    };
    let interval = args.interval.unwrap_or(config.scheduler.interval_secs);

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Config", args.config.display());
    output::field("Exchanges", exchanges.join(", "));
    output::field("Recorder", recorder);
    if !args.once {
        output::field("Interval", format!("{interval}s"));
    }
    if output::verbosity() > 0 {
        let cycle = config.triangular.cycle();
        output::field(
            "Triangle",
            format!("{} / {} / {}", cycle.direct, cycle.inverted, cycle.bridge),
        );
    }
}

/// Print the outcome of a single `--once` cycle.
fn print_report(report: &CycleReport) {
    output::section("Cycle");
    output::field("Snapshots", report.snapshots);
    output::field("Pairwise", report.pairwise_events);
    output::field("Opportunities", report.opportunities);
    for exchange in &report.failed_sources {
        output::warning(&format!("{exchange} returned no prices"));
    }

    for outcome in &report.triangular {
        match outcome {
            TriangularOutcome::Evaluated {
                exchange,
                difference,
                is_opportunity,
            } => {
                let difference = output::signed(difference, *is_opportunity);
                if *is_opportunity {
                    output::opportunity("triangular", &format!("{exchange} {difference}"));
                } else {
                    output::field("Triangular", format!("{exchange} {difference}"));
                }
            }
            TriangularOutcome::Incomplete { exchange, missing } => {
                let missing: Vec<String> = missing.iter().map(ToString::to_string).collect();
                output::warning(&format!(
                    "{exchange} triangle incomplete, missing {}",
                    missing.join(", ")
                ));
            }
            TriangularOutcome::NoData { exchange } => {
                output::warning(&format!("{exchange} has no data for the triangle"));
            }
            TriangularOutcome::Failed { exchange, error } => {
                output::warning(&format!("{exchange} triangle failed: {error}"));
            }
        }
    }

    if report.recorder_failures > 0 {
        output::warning(&format!(
            "{} recorder write(s) failed",
            report.recorder_failures
        ));
    } else {
        output::success("Cycle recorded");
    }
}
