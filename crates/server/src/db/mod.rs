//! Database operations for the Trueline `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `profile` - Digital business card records (JSONB for ordered sub-lists)
//! - `scan_event` - Append-only public view log (weak profile reference)
//! - `save_event` - Append-only vCard save log (weak profile reference)
//!
//! `scan_event` and `save_event` deliberately carry no foreign key to
//! `profile`: deleting a profile never touches its historical events, and an
//! event append never checks profile existence.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and applied
//! explicitly via `sqlx migrate run`, never at startup.

pub mod events;
pub mod profiles;

use std::future::Future;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use trueline_core::ProfileId;

use crate::models::{Profile, SaveEvent, ScanEvent};

pub use events::EventRepository;
pub use profiles::ProfileRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Read access to profile records.
///
/// The public access path consumes profiles through this interface so it can
/// be exercised against an in-memory store in tests.
pub trait ProfileStore: Send + Sync {
    /// Fetch a profile by id, `None` if absent.
    fn get(
        &self,
        id: ProfileId,
    ) -> impl Future<Output = Result<Option<Profile>, RepositoryError>> + Send;
}

/// Append access to the analytics event log.
///
/// Appends are only ever invoked from the background event writer; request
/// handlers never await them.
pub trait EventStore: Send + Sync + 'static {
    fn append_scan(
        &self,
        event: ScanEvent,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    fn append_save(
        &self,
        event: SaveEvent,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
