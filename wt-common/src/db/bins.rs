//! Bin store
//!
//! Durable last-known state of every bin, keyed by `bin_id`. An observation
//! for a known bin overwrites all of its fields; there is no delete and no
//! partial update. Concurrent writers to the same bin are serialized by
//! SQLite and the last write wins.

use crate::models::{BinObservation, BinRecord, BinStatus};
use crate::{time, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

/// SQLite-backed store of [`BinRecord`]s
#[derive(Clone)]
pub struct BinStore {
    db: SqlitePool,
}

impl BinStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Insert the bin if unseen, otherwise replace its state
    ///
    /// `last_update` is always the current time at write.
    pub async fn upsert(&self, observation: &BinObservation) -> Result<()> {
        let now = time::now();

        sqlx::query(
            r#"
            INSERT INTO bins (bin_id, lat, lon, type, status, last_update)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(bin_id) DO UPDATE SET
                lat = excluded.lat,
                lon = excluded.lon,
                type = excluded.type,
                status = excluded.status,
                last_update = excluded.last_update
            "#,
        )
        .bind(&observation.bin_id)
        .bind(observation.lat)
        .bind(observation.lon)
        .bind(&observation.bin_type)
        .bind(observation.status.as_str())
        .bind(now)
        .execute(&self.db)
        .await?;

        debug!(
            bin_id = %observation.bin_id,
            status = %observation.status,
            "Recorded bin observation"
        );

        Ok(())
    }

    /// Every known bin, in no particular order
    pub async fn list_all(&self) -> Result<Vec<BinRecord>> {
        let rows = sqlx::query(
            "SELECT bin_id, lat, lon, type, status, last_update FROM bins",
        )
        .fetch_all(&self.db)
        .await?;

        rows.iter().map(record_from_row).collect()
    }

    /// Look up a single bin
    pub async fn get(&self, bin_id: &str) -> Result<Option<BinRecord>> {
        let row = sqlx::query(
            "SELECT bin_id, lat, lon, type, status, last_update FROM bins WHERE bin_id = ?",
        )
        .bind(bin_id)
        .fetch_optional(&self.db)
        .await?;

        row.as_ref().map(record_from_row).transpose()
    }

    /// Number of known bins
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bins")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }
}

fn record_from_row(row: &SqliteRow) -> Result<BinRecord> {
    Ok(BinRecord {
        bin_id: row.try_get("bin_id")?,
        lat: row.try_get("lat")?,
        lon: row.try_get("lon")?,
        bin_type: row.try_get("type")?,
        status: BinStatus::from(row.try_get::<String, _>("status")?),
        last_update: row.try_get("last_update")?,
    })
}
