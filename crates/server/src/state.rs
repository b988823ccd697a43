//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::db::{EventRepository, ProfileRepository};
use crate::services::{AnalyticsAggregator, EventLogger, PublicAccessService};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to configuration, the
/// database pool, and the service layer.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    public: PublicAccessService<ProfileRepository>,
    analytics: AnalyticsAggregator,
    profiles: ProfileRepository,
    events: EventRepository,
}

impl AppState {
    /// Create application state and spawn the background event writer.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let (events, _writer) =
            EventLogger::spawn(EventRepository::new(pool.clone()), config.event_queue_capacity);

        let profiles = ProfileRepository::new(pool.clone());
        let public = PublicAccessService::new(profiles.clone(), events);
        let analytics = AnalyticsAggregator::new(
            ProfileRepository::new(pool.clone()),
            EventRepository::new(pool.clone()),
        );
        let event_repo = EventRepository::new(pool.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                public,
                analytics,
                profiles,
                events: event_repo,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the public access service.
    #[must_use]
    pub fn public(&self) -> &PublicAccessService<ProfileRepository> {
        &self.inner.public
    }

    /// Get a reference to the analytics aggregator.
    #[must_use]
    pub fn analytics(&self) -> &AnalyticsAggregator {
        &self.inner.analytics
    }

    /// Get a reference to the profile repository (admin CRUD).
    #[must_use]
    pub fn profiles(&self) -> &ProfileRepository {
        &self.inner.profiles
    }

    /// Get a reference to the event repository (admin manual scan recording).
    #[must_use]
    pub fn events(&self) -> &EventRepository {
        &self.inner.events
    }
}
