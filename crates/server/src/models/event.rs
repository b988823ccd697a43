//! Analytics event types.
//!
//! Scan and save events are append-only records keyed by profile id. The
//! reference is weak: deleting a profile leaves its events in place, so a
//! dashboard keeps historical traffic for removed cards.

use chrono::{DateTime, Utc};
use serde::Serialize;

use trueline_core::ProfileId;

/// Which analytics event stream a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A public profile view.
    Scan,
    /// A vCard download/save action.
    Save,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Save => "save",
        }
    }
}

/// Request metadata captured alongside an event.
///
/// Both fields are best-effort; a proxy may hide the client address and a
/// client may send no user-agent.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta {
    pub ip_address: Option<String>,
    pub device: Option<String>,
}

/// A record of a public profile view.
#[derive(Debug, Clone)]
pub struct ScanEvent {
    pub profile_id: ProfileId,
    pub scanned_at: DateTime<Utc>,
    pub location: Option<String>,
    pub device: Option<String>,
    pub ip_address: Option<String>,
}

impl ScanEvent {
    /// Build a scan event timestamped now from request metadata.
    #[must_use]
    pub fn now(profile_id: ProfileId, meta: ClientMeta) -> Self {
        Self {
            profile_id,
            scanned_at: Utc::now(),
            location: None,
            device: meta.device,
            ip_address: meta.ip_address,
        }
    }
}

/// A record of a vCard download/save action.
#[derive(Debug, Clone)]
pub struct SaveEvent {
    pub profile_id: ProfileId,
    pub saved_at: DateTime<Utc>,
    pub device: Option<String>,
    pub ip_address: Option<String>,
}

impl SaveEvent {
    /// Build a save event timestamped now from request metadata.
    #[must_use]
    pub fn now(profile_id: ProfileId, meta: ClientMeta) -> Self {
        Self {
            profile_id,
            saved_at: Utc::now(),
            device: meta.device,
            ip_address: meta.ip_address,
        }
    }
}

/// Event count for one calendar day (UTC).
///
/// Series built from these are sparse: days with zero events are omitted,
/// and consumers fill gaps if they want a dense series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DailyCount {
    /// Calendar day formatted `YYYY-MM-DD`.
    pub date: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_event_carries_request_metadata() {
        let id = ProfileId::generate();
        let event = ScanEvent::now(
            id,
            ClientMeta {
                ip_address: Some("203.0.113.9".to_owned()),
                device: Some("Mozilla/5.0".to_owned()),
            },
        );

        assert_eq!(event.profile_id, id);
        assert_eq!(event.ip_address.as_deref(), Some("203.0.113.9"));
        assert_eq!(event.device.as_deref(), Some("Mozilla/5.0"));
        assert!(event.location.is_none());
    }

    #[test]
    fn save_event_defaults_are_empty() {
        let event = SaveEvent::now(ProfileId::generate(), ClientMeta::default());
        assert!(event.ip_address.is_none());
        assert!(event.device.is_none());
    }
}
