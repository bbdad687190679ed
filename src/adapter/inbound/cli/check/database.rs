use std::path::Path;

use crate::adapter::inbound::cli::{config, output};
use crate::adapter::outbound::sqlite::SqliteRecorder;
use crate::error::Result;
use crate::port::outbound::Recorder;

/// Open the database, apply migrations and run the recorder health check.
pub async fn execute(path: &Path) -> Result<()> {
    let config = config::load(path)?;
    let db_path = &config.database.path;

    output::section("Database Check");
    output::field("Path", db_path.display());
    if !config.database.enabled {
        output::warning("Persistence is disabled in config; checking the file anyway");
    }

    let pb = output::spinner("Opening database...");
    let recorder = match SqliteRecorder::open(db_path) {
        Ok(recorder) => recorder,
        Err(e) => {
            output::spinner_fail(&pb, "Could not open database");
            return Err(e);
        }
    };
    output::spinner_success(&pb, "Migrations applied");

    let pb = output::spinner("Writing probe record...");
    if let Err(e) = recorder.health_check().await {
        output::spinner_fail(&pb, "Probe write failed");
        return Err(e);
    }
    output::spinner_success(&pb, "Probe record written and removed");

    let counts = recorder.counts().await?;
    output::field("Prices", counts.price_records);
    output::field("Pairwise", counts.arbitrage_records);
    output::field("Triangular", counts.triangular_records);

    output::success("Database check complete");
    Ok(())
}
