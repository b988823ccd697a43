//! Application services.
//!
//! - [`public_access`] - Visitor-facing profile reads and vCard rendering
//! - [`event_log`] - Background, fire-and-forget analytics event writer
//! - [`analytics`] - Dashboard aggregation over the event log

pub mod analytics;
pub mod event_log;
pub mod public_access;

pub use analytics::{AnalyticsAggregator, DashboardStats};
pub use event_log::EventLogger;
pub use public_access::{AccessError, PublicAccessService, VcardFile};
