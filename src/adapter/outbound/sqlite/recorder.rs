//! SQLite result persistence.
//!
//! Records price snapshots, pairwise events and triangular evaluations.
//! Implements the [`Recorder`] port. Diesel is synchronous, so each call
//! runs on the blocking thread pool.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, warn};

use super::database::connection::{
    configure_sqlite_connection, create_pool, run_migrations, DbPool,
};
use super::database::model::{ArbitrageRecordRow, PriceRecordRow, TriangularRecordRow};
use super::database::schema::{arbitrage_records, price_records, triangular_arbitrage_records};
use crate::domain::{EventId, PairwiseArbitrageEvent, PriceSnapshot, TriangularArbitrageEvent};
use crate::error::{Error, Result};
use crate::port::outbound::Recorder;

/// Row counts per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordCounts {
    pub price_records: i64,
    pub arbitrage_records: i64,
    pub triangular_records: i64,
}

/// SQLite-backed recorder.
#[derive(Clone)]
pub struct SqliteRecorder {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteRecorder {
    /// Create a recorder with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open (or create) the database file and apply migrations.
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created, the pool
    /// cannot be built, or migrations fail.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let url = path.to_string_lossy();
        let pool = create_pool(&url)?;
        run_migrations(&pool)?;
        debug!(path = %path.display(), "Opened SQLite recorder");
        Ok(Self::new(pool))
    }

    /// Run `f` on a pooled connection inside the blocking thread pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            if let Err(e) = configure_sqlite_connection(&mut conn) {
                warn!(error = %e, "Failed to configure SQLite connection");
            }
            f(&mut conn)
        })
        .await
        .map_err(|e| Error::Database(format!("recorder task failed: {e}")))?
    }

    /// Count rows in every table.
    ///
    /// # Errors
    /// Returns an error if a query fails.
    pub async fn counts(&self) -> Result<RecordCounts> {
        self.with_conn(|conn| {
            Ok(RecordCounts {
                price_records: price_records::table.count().get_result(conn)?,
                arbitrage_records: arbitrage_records::table.count().get_result(conn)?,
                triangular_records: triangular_arbitrage_records::table
                    .count()
                    .get_result(conn)?,
            })
        })
        .await
    }
}

#[async_trait]
impl Recorder for SqliteRecorder {
    async fn record_snapshots(&self, snapshots: &[PriceSnapshot]) -> Result<()> {
        if snapshots.is_empty() {
            return Ok(());
        }
        let rows: Vec<PriceRecordRow> = snapshots.iter().map(PriceRecordRow::from).collect();

        let inserted = self
            .with_conn(move |conn| {
                Ok(conn.transaction(|conn| {
                    diesel::insert_into(price_records::table)
                        .values(&rows)
                        .execute(conn)
                })?)
            })
            .await?;

        debug!(rows = inserted, "Recorded price snapshots");
        Ok(())
    }

    async fn record_pairwise_events(&self, events: &[PairwiseArbitrageEvent]) -> Result<()> {
        if events.is_empty() {
            return Ok(());
        }
        let rows: Vec<ArbitrageRecordRow> = events.iter().map(ArbitrageRecordRow::from).collect();

        let inserted = self
            .with_conn(move |conn| {
                Ok(conn.transaction(|conn| {
                    diesel::insert_into(arbitrage_records::table)
                        .values(&rows)
                        .execute(conn)
                })?)
            })
            .await?;

        debug!(rows = inserted, "Recorded pairwise events");
        Ok(())
    }

    async fn record_triangular_event(&self, event: &TriangularArbitrageEvent) -> Result<()> {
        let row = TriangularRecordRow::from(event);

        self.with_conn(move |conn| {
            diesel::insert_into(triangular_arbitrage_records::table)
                .values(&row)
                .execute(conn)?;
            Ok(())
        })
        .await?;

        debug!(id = %event.id(), "Recorded triangular event");
        Ok(())
    }

    /// Insert and delete a probe arbitrage record.
    async fn health_check(&self) -> Result<()> {
        let probe = ArbitrageRecordRow {
            uuid: EventId::new().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            currency: "PROBE".to_string(),
            price_a: "1".to_string(),
            exchange_a: "probe".to_string(),
            price_b: "1".to_string(),
            exchange_b: "probe".to_string(),
            projected_profit: "0".to_string(),
            is_arbitrage_opportunity: false,
        };

        let deleted = self
            .with_conn(move |conn| {
                diesel::insert_into(arbitrage_records::table)
                    .values(&probe)
                    .execute(conn)?;
                let deleted = diesel::delete(
                    arbitrage_records::table.filter(arbitrage_records::uuid.eq(&probe.uuid)),
                )
                .execute(conn)?;
                Ok(deleted)
            })
            .await?;

        if deleted != 1 {
            return Err(Error::Database(format!(
                "health check probe was not removed cleanly ({deleted} rows deleted)"
            )));
        }
        debug!("SQLite health check passed");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}
