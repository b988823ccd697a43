//! Visitor-facing route handlers.
//!
//! These are the endpoints an NFC tag or shared link hits. Identifier
//! validation happens here, before any store access; analytics logging is
//! handed off to the background writer and never awaited.

use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, FromRequestParts, Path, State},
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use trueline_core::ProfileId;

use crate::error::{AppError, Result};
use crate::models::{ClientMeta, PublicProfileView};
use crate::state::AppState;

/// Extract client metadata (ip, user-agent) from request parts.
///
/// Prefers the first `X-Forwarded-For` hop (reverse-proxy deployments), then
/// the socket peer address. Never rejects; absent data stays `None`.
impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());

        let ip_address = forwarded.or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        });

        let device = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Ok(Self { ip_address, device })
    }
}

/// Validate a raw path segment as a profile identifier.
///
/// Malformed input is rejected with 400 before any store access.
fn parse_profile_id(raw: &str) -> Result<ProfileId> {
    ProfileId::parse(raw).map_err(|_| AppError::BadRequest("Invalid profile id".to_owned()))
}

/// Response envelope for the public profile endpoint.
#[derive(Debug, Serialize)]
pub struct PublicProfileResponse {
    pub success: bool,
    pub profile: PublicProfileView,
}

/// Serve a public profile view.
///
/// Logs a scan event as a side effect; the response never waits on it.
#[instrument(skip(state, meta), fields(profile_id = %profile_id))]
pub async fn public_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
    meta: ClientMeta,
) -> Result<Json<PublicProfileResponse>> {
    let id = parse_profile_id(&profile_id)?;
    let profile = state.public().public_profile(id, meta).await?;

    Ok(Json(PublicProfileResponse {
        success: true,
        profile,
    }))
}

/// Serve a profile as a vCard download.
///
/// `Content-Disposition` (attachment vs inline) follows the deployment's
/// configuration; `Content-Length` is set by the framework from the body.
#[instrument(skip(state), fields(profile_id = %profile_id))]
pub async fn vcf(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> Result<Response> {
    let id = parse_profile_id(&profile_id)?;
    let file = state.public().vcard(id).await?;

    let disposition = format!(
        "{}; filename=\"{}\"",
        state.config().vcf_disposition.as_str(),
        file.filename
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/vcard; charset=utf-8".to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.body,
    )
        .into_response())
}

/// Request body for save logging.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSaveRequest {
    pub profile_id: String,
}

/// Response for save logging.
#[derive(Debug, Serialize)]
pub struct LogSaveResponse {
    pub success: bool,
}

/// Record a vCard save, best-effort.
///
/// Returns 200 for any well-formed id regardless of the event write's
/// outcome or whether the profile exists, so the contact download is never
/// held up. Only a missing or malformed id is rejected.
#[instrument(skip(state, meta, body))]
pub async fn log_save(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(body): Json<LogSaveRequest>,
) -> Result<(StatusCode, Json<LogSaveResponse>)> {
    let id = parse_profile_id(&body.profile_id)?;

    state.public().log_save(id, meta);

    Ok((StatusCode::OK, Json(LogSaveResponse { success: true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_is_rejected_before_lookup() {
        assert!(parse_profile_id("not-a-uuid").is_err());
        assert!(parse_profile_id("").is_err());
        assert!(parse_profile_id("0191d8a2-5b3c-7e4f-9a1b-2c3d4e5f6a7b").is_ok());
    }
}
