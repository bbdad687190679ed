//! Config loading shared by CLI handlers.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::app::Config;
use crate::error::Result;

/// Load `path` (defaults when missing), apply `-v`/`-q` to the log level and
/// initialise logging.
#[allow(clippy::result_large_err)]
pub fn load(path: &Path) -> Result<Config> {
    let mut config = Config::load_or_default(path)?;

    if let Some(level) = level_override(output::verbosity(), output::is_quiet()) {
        config.logging.level = level.to_string();
    }
    config.init_logging();

    if !path.exists() {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
    }
    Ok(config)
}

/// Log level implied by the global verbosity flags, if any.
fn level_override(verbose: u8, quiet: bool) -> Option<&'static str> {
    match (verbose, quiet) {
        (0, true) => Some("warn"),
        (0, false) => None,
        (1, _) => Some("debug"),
        _ => Some("trace"),
    }
}
