use std::path::Path;

use crate::adapter::inbound::cli::{config, output};
use crate::adapter::outbound::exchange::{create_sources, http};
use crate::error::{Error, ExchangeError, Result};

/// Fetch prices once from every enabled exchange.
pub async fn execute(path: &Path) -> Result<()> {
    let config = config::load(path)?;
    let client = http::build_client(&config.http);
    let sources = create_sources(&client, &config.exchanges);
    let timeout = config.scheduler.adapter_timeout();

    output::section("Exchange Check");
    let mut failed = 0usize;
    for source in &sources {
        let name = source.exchange().to_string();
        let pb = output::spinner(&format!("Fetching {name}..."));

        let result = match tokio::time::timeout(timeout, source.fetch_prices()).await {
            Ok(result) => result,
            Err(_) => Err(ExchangeError::Timeout {
                exchange: name.clone(),
                timeout_ms: config.scheduler.adapter_timeout_ms,
            }
            .into()),
        };

        match result {
            Ok(snapshots) => {
                output::spinner_success(&pb, &format!("{name}: {} prices", snapshots.len()));
                if output::verbosity() > 0 {
                    for snapshot in &snapshots {
                        output::field(snapshot.pair().as_str(), snapshot.price());
                    }
                }
            }
            Err(e) => {
                failed += 1;
                output::spinner_fail(&pb, &format!("{name}: {e}"));
            }
        }
    }

    if failed > 0 {
        output::hint("check network access and [exchanges] base URLs");
        return Err(Error::Connection(format!(
            "{failed} of {} exchanges unreachable",
            sources.len()
        )));
    }
    output::success("All exchanges reachable");
    Ok(())
}
