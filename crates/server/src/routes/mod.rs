//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (DB ping)
//!
//! # Public (visitor-facing, no auth)
//! GET  /public/{profile_id}        - Public profile view (logs a scan)
//! GET  /vcf/{profile_id}           - vCard download
//! POST /profile/log-save           - Best-effort vCard save logging
//!
//! # Admin (deploy behind external authentication)
//! POST   /profile                  - Create profile
//! DELETE /profile/{profile_id}     - Delete profile (events are kept)
//! POST /admin/record-scan          - Manually record a scan (with location)
//! GET  /admin/dashboard-stats      - Profile/scan/save totals
//! GET  /admin/scan-analytics       - Per-day scan counts (trailing window)
//! GET  /admin/export-profiles      - All profiles as a JSON download
//! ```
//!
//! Authentication for the admin surface is an external collaborator: these
//! handlers assume an upstream proxy or gateway has already authenticated
//! the caller.

pub mod admin;
pub mod public;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the visitor-facing routes router.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/public/{profile_id}", get(public::public_profile))
        .route("/vcf/{profile_id}", get(public::vcf))
        .route("/profile/log-save", post(public::log_save))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", post(admin::create_profile))
        .route("/profile/{profile_id}", delete(admin::delete_profile))
        .route("/admin/record-scan", post(admin::record_scan))
        .route("/admin/dashboard-stats", get(admin::dashboard_stats))
        .route("/admin/scan-analytics", get(admin::scan_analytics))
        .route("/admin/export-profiles", get(admin::export_profiles))
}

/// Create the complete application router.
pub fn routes() -> Router<AppState> {
    Router::new().merge(public_routes()).merge(admin_routes())
}
