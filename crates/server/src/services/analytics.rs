//! Dashboard analytics.
//!
//! Counts are independent approximate counters, not a consistent join: the
//! three dashboard totals are separate queries racing against concurrent
//! event writes, and that race is accepted. Numbers are an
//! eventually-consistent, slightly-stale view by design.

use chrono::{Duration, Utc};
use serde::Serialize;

use crate::db::{EventRepository, ProfileRepository, RepositoryError};
use crate::models::{DailyCount, EventKind};

/// Default trailing window for scan analytics, in days.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Headline totals for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_profiles: i64,
    pub total_scans: i64,
    pub total_saves: i64,
}

/// Read-side aggregation over profiles and the event log.
#[derive(Clone)]
pub struct AnalyticsAggregator {
    profiles: ProfileRepository,
    events: EventRepository,
}

impl AnalyticsAggregator {
    pub const fn new(profiles: ProfileRepository, events: EventRepository) -> Self {
        Self { profiles, events }
    }

    /// Total profile, scan, and save counts.
    ///
    /// The three counts are issued concurrently and are not taken inside a
    /// snapshot; they may disagree by in-flight writes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any count query fails.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, RepositoryError> {
        let (total_profiles, total_scans, total_saves) = tokio::try_join!(
            self.profiles.count(),
            self.events.count(EventKind::Scan),
            self.events.count(EventKind::Save),
        )?;

        Ok(DashboardStats {
            total_profiles,
            total_scans,
            total_saves,
        })
    }

    /// Per-day scan counts over the trailing `window_days` window.
    ///
    /// Sparse ascending series; days with zero scans are omitted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the aggregate query fails.
    pub async fn scan_analytics(
        &self,
        window_days: i64,
    ) -> Result<Vec<DailyCount>, RepositoryError> {
        let since = Utc::now() - Duration::days(window_days.max(1));
        self.events.daily_counts(EventKind::Scan, since).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_stats_serializes_with_wire_names() {
        let stats = DashboardStats {
            total_profiles: 3,
            total_scans: 120,
            total_saves: 14,
        };

        let json = serde_json::to_value(stats).expect("serialize");
        assert_eq!(json["totalProfiles"], 3);
        assert_eq!(json["totalScans"], 120);
        assert_eq!(json["totalSaves"], 14);
    }
}
