use std::process::ExitCode;

use arbhunter::adapter::inbound::cli::command::{Cli, ColorChoice, Commands};
use arbhunter::adapter::inbound::cli::output::{self, OutputConfig};
use arbhunter::adapter::inbound::cli::{check, run};
use clap::Parser;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    output::set_color(match cli.color {
        ColorChoice::Auto => None,
        ColorChoice::Always => Some(true),
        ColorChoice::Never => Some(false),
    });
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    let result = match &cli.command {
        Commands::Run(args) => run::execute(args, shutdown_rx).await,
        Commands::Check(command) => check::execute(command).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Fatal error");
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
