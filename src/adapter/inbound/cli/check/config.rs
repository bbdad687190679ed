use std::path::Path;

use crate::adapter::inbound::cli::{config, output};
use crate::error::Result;

/// Validate the configuration file without starting the detector.
pub fn execute(path: &Path) -> Result<()> {
    let exists = path.exists();
    let config = config::load(path)?;

    output::section("Configuration Check");
    output::field("Config", path.display());
    if exists {
        output::success("Configuration file is valid");
    } else {
        output::warning("Configuration file not found, defaults apply");
    }

    output::section("Exchanges");
    for exchange in &config.exchanges.enabled {
        output::field(
            exchange.display_name(),
            format!(
                "fee {} at {}",
                config.exchanges.taker_fee(*exchange),
                config.exchanges.base_url(*exchange)
            ),
        );
    }

    output::section("Scheduler");
    output::field("Interval", format!("{}s", config.scheduler.interval_secs));
    output::field(
        "Timeout",
        format!("{}ms", config.scheduler.adapter_timeout_ms),
    );

    output::section("Triangular");
    let cycle = config.triangular.cycle();
    output::field(
        "Cycle",
        format!("{} / {} / {}", cycle.direct, cycle.inverted, cycle.bridge),
    );
    let venues: Vec<&str> = config
        .triangular
        .exchanges
        .iter()
        .map(|exchange| exchange.display_name())
        .collect();
    output::field("Exchanges", venues.join(", "));

    output::section("Database");
    if config.database.enabled {
        output::field("Path", config.database.path.display());
    } else {
        output::field("Path", "disabled");
    }

    output::success("Configuration check complete");
    Ok(())
}
