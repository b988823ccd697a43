//! Event log repository.
//!
//! Scan and save events are append-only. Nothing updates or deletes them in
//! normal operation, and appends never check that the referenced profile
//! still exists.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use trueline_core::EventId;

use super::{EventStore, RepositoryError};
use crate::models::{DailyCount, EventKind, SaveEvent, ScanEvent};

/// Repository for scan/save event operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a scan event.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert_scan(&self, event: ScanEvent) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO scan_event (id, profile_id, scanned_at, location, device, ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(EventId::generate())
        .bind(event.profile_id)
        .bind(event.scanned_at)
        .bind(&event.location)
        .bind(&event.device)
        .bind(&event.ip_address)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Append a save event.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert_save(&self, event: SaveEvent) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO save_event (id, profile_id, saved_at, device, ip_address) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(EventId::generate())
        .bind(event.profile_id)
        .bind(event.saved_at)
        .bind(&event.device)
        .bind(&event.ip_address)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Count all events of one kind.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, kind: EventKind) -> Result<i64, RepositoryError> {
        let sql = match kind {
            EventKind::Scan => "SELECT count(*) FROM scan_event",
            EventKind::Save => "SELECT count(*) FROM save_event",
        };

        let count = sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Per-day event counts since `since`, grouped by UTC calendar day.
    ///
    /// The series is sparse and strictly ascending: days with zero events are
    /// omitted. Repeated events from the same visitor all count (no
    /// deduplication).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn daily_counts(
        &self,
        kind: EventKind,
        since: DateTime<Utc>,
    ) -> Result<Vec<DailyCount>, RepositoryError> {
        let sql = match kind {
            EventKind::Scan => {
                "SELECT to_char(scanned_at AT TIME ZONE 'UTC', 'YYYY-MM-DD') AS date, \
                        count(*) AS count \
                 FROM scan_event \
                 WHERE scanned_at >= $1 \
                 GROUP BY 1 \
                 ORDER BY 1 ASC"
            }
            EventKind::Save => {
                "SELECT to_char(saved_at AT TIME ZONE 'UTC', 'YYYY-MM-DD') AS date, \
                        count(*) AS count \
                 FROM save_event \
                 WHERE saved_at >= $1 \
                 GROUP BY 1 \
                 ORDER BY 1 ASC"
            }
        };

        let rows = sqlx::query_as::<_, DailyCount>(sql)
            .bind(since)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

impl EventStore for EventRepository {
    async fn append_scan(&self, event: ScanEvent) -> Result<(), RepositoryError> {
        self.insert_scan(event).await
    }

    async fn append_save(&self, event: SaveEvent) -> Result<(), RepositoryError> {
        self.insert_save(event).await
    }
}
