//! Admin route handlers.
//!
//! Profile lifecycle (create/delete), dashboard totals, scan analytics, and
//! profile export. Deployed behind external authentication; nothing here
//! issues or checks credentials.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use trueline_core::ProfileId;

use crate::error::{AppError, Result};
use crate::models::{ClientMeta, NewProfile, Profile, ScanEvent};
use crate::services::analytics::DEFAULT_WINDOW_DAYS;
use crate::services::DashboardStats;
use crate::state::AppState;

/// Create a new profile.
///
/// Validates the required name field; everything else defaults. Image upload
/// and URL handling happen upstream, this endpoint only accepts JSON.
#[instrument(skip(state, new))]
pub async fn create_profile(
    State(state): State<AppState>,
    Json(mut new): Json<NewProfile>,
) -> Result<(StatusCode, Json<Profile>)> {
    new.name = new.name.trim().to_owned();
    if new.name.is_empty() {
        return Err(AppError::BadRequest("Profile name is required".to_owned()));
    }

    let profile = state.profiles().insert(new).await?;
    tracing::info!(profile_id = %profile.id, "profile created");

    Ok((StatusCode::CREATED, Json(profile)))
}

/// Response for profile deletion.
#[derive(Debug, Serialize)]
pub struct DeleteProfileResponse {
    pub success: bool,
    pub message: String,
}

/// Delete a profile.
///
/// The profile's scan/save events are intentionally left in place; dashboard
/// history survives card removal.
#[instrument(skip(state), fields(profile_id = %profile_id))]
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> Result<Json<DeleteProfileResponse>> {
    let id = ProfileId::parse(&profile_id)
        .map_err(|_| AppError::BadRequest("Invalid profile id".to_owned()))?;

    let deleted = state.profiles().delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Profile not found".to_owned()));
    }

    tracing::info!(profile_id = %id, "profile deleted");
    Ok(Json(DeleteProfileResponse {
        success: true,
        message: "Profile deleted successfully".to_owned(),
    }))
}

/// Request body for manual scan recording.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordScanRequest {
    #[serde(default)]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
}

/// Response for manual scan recording.
#[derive(Debug, Serialize)]
pub struct RecordScanResponse {
    pub success: bool,
    pub message: String,
}

fn required_profile_id(raw: Option<&str>) -> Result<ProfileId> {
    let raw = raw.unwrap_or("");
    if raw.is_empty() {
        return Err(AppError::BadRequest("Profile ID is required".to_owned()));
    }
    ProfileId::parse(raw).map_err(|_| AppError::BadRequest("Invalid profile id".to_owned()))
}

/// Record a scan on behalf of a profile.
///
/// The operator path for entering scans that did not come through the public
/// endpoint (a trade-show kiosk, a paper sign-in sheet) and the only writer
/// that fills in `location`. Unlike public logging this write is awaited: the
/// caller learns whether the event landed.
#[instrument(skip(state, meta, body))]
pub async fn record_scan(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(body): Json<RecordScanRequest>,
) -> Result<(StatusCode, Json<RecordScanResponse>)> {
    let id = required_profile_id(body.profile_id.as_deref())?;

    let event = ScanEvent {
        profile_id: id,
        scanned_at: Utc::now(),
        location: body.location,
        device: body.device,
        ip_address: meta.ip_address,
    };
    state.events().insert_scan(event).await?;

    tracing::info!(profile_id = %id, "scan recorded");
    Ok((
        StatusCode::CREATED,
        Json(RecordScanResponse {
            success: true,
            message: "Scan recorded successfully".to_owned(),
        }),
    ))
}

/// Headline totals for the dashboard.
///
/// Three independent approximate counters; not a transactional snapshot.
#[instrument(skip(state))]
pub async fn dashboard_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    let stats = state.analytics().dashboard_stats().await?;
    Ok(Json(stats))
}

/// Query parameters for scan analytics.
#[derive(Debug, Deserialize)]
pub struct ScanAnalyticsQuery {
    /// Trailing window in days (default 30, clamped to 1..=365).
    pub days: Option<i64>,
}

impl ScanAnalyticsQuery {
    fn window_days(&self) -> i64 {
        self.days.unwrap_or(DEFAULT_WINDOW_DAYS).clamp(1, 365)
    }
}

/// One point in the scan trend series.
#[derive(Debug, Serialize)]
pub struct ScanPoint {
    pub date: String,
    pub scans: i64,
}

/// Response for scan analytics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanAnalyticsResponse {
    pub success: bool,
    pub scan_data: Vec<ScanPoint>,
}

/// Per-day scan counts over a trailing window.
///
/// Sparse ascending series; days with zero scans are omitted and left for
/// the chart to fill.
#[instrument(skip(state))]
pub async fn scan_analytics(
    State(state): State<AppState>,
    Query(query): Query<ScanAnalyticsQuery>,
) -> Result<Json<ScanAnalyticsResponse>> {
    let daily = state.analytics().scan_analytics(query.window_days()).await?;

    let scan_data = daily
        .into_iter()
        .map(|d| ScanPoint {
            date: d.date,
            scans: d.count,
        })
        .collect();

    Ok(Json(ScanAnalyticsResponse {
        success: true,
        scan_data,
    }))
}

/// Export all profiles as a JSON file download.
#[instrument(skip(state))]
pub async fn export_profiles(State(state): State<AppState>) -> Result<Response> {
    let profiles = state.profiles().list_all().await?;

    let file_name = format!(
        "trueline-profiles-export-{}.json",
        Utc::now().format("%Y-%m-%d")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        Json(profiles),
    )
        .into_response())
}
