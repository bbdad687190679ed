//! Diagnostic command handlers.

pub mod config;
pub mod database;
pub mod exchanges;

use crate::adapter::inbound::cli::command::CheckCommand;
use crate::error::Result;

/// Dispatch a `check` subcommand.
pub async fn execute(command: &CheckCommand) -> Result<()> {
    match command {
        CheckCommand::Config(arg) => config::execute(&arg.config),
        CheckCommand::Database(arg) => database::execute(&arg.config).await,
        CheckCommand::Exchanges(arg) => exchanges::execute(&arg.config).await,
    }
}
