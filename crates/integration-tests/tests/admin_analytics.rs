//! Integration tests for the admin dashboard and analytics endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p trueline-server)
//!
//! Run with: cargo test -p trueline-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use trueline_core::ProfileId;
use uuid::Uuid;

/// Base URL for the server (configurable via environment).
fn base_url() -> String {
    std::env::var("TRUELINE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn client() -> Client {
    Client::builder().build().expect("Failed to create HTTP client")
}

async fn create_test_profile(client: &Client, name: &str) -> String {
    let base_url = base_url();
    let resp = client
        .post(format!("{base_url}/profile"))
        .json(&json!({"ownerId": Uuid::new_v4(), "name": name}))
        .send()
        .await
        .expect("Failed to create test profile");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse profile");
    let raw = body["id"].as_str().expect("profile id");
    // Served ids must round-trip through the platform's identifier type.
    ProfileId::parse(raw).expect("well-formed profile id").to_string()
}

// ============================================================================
// Dashboard Stats Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_dashboard_stats_shape() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/admin/dashboard-stats"))
        .send()
        .await
        .expect("Failed to get dashboard stats");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!(body["totalProfiles"].is_i64());
    assert!(body["totalScans"].is_i64());
    assert!(body["totalSaves"].is_i64());
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_scan_count_grows_with_public_views() {
    let client = client();
    let base_url = base_url();
    let id = create_test_profile(&client, "Analytics Jane").await;

    let before: Value = client
        .get(format!("{base_url}/admin/dashboard-stats"))
        .send()
        .await
        .expect("stats")
        .json()
        .await
        .expect("parse");

    // Each concurrent identical view logs independently (no dedup).
    for _ in 0..3 {
        let resp = client
            .get(format!("{base_url}/public/{id}"))
            .send()
            .await
            .expect("public view");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // The event writer is asynchronous; give it a moment to drain.
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;

    let after: Value = client
        .get(format!("{base_url}/admin/dashboard-stats"))
        .send()
        .await
        .expect("stats")
        .json()
        .await
        .expect("parse");

    let scans_before = before["totalScans"].as_i64().unwrap_or(0);
    let scans_after = after["totalScans"].as_i64().unwrap_or(0);
    assert!(scans_after >= scans_before + 3);

    let _ = client
        .delete(format!("{base_url}/profile/{id}"))
        .send()
        .await;
}

// ============================================================================
// Manual Scan Recording Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_record_scan_stores_event_with_location() {
    let client = client();
    let base_url = base_url();
    let id = create_test_profile(&client, "Kiosk Jane").await;

    let before: Value = client
        .get(format!("{base_url}/admin/dashboard-stats"))
        .send()
        .await
        .expect("stats")
        .json()
        .await
        .expect("parse");

    let resp = client
        .post(format!("{base_url}/admin/record-scan"))
        .json(&json!({"profileId": id, "location": "Expo Hall B", "device": "Kiosk"}))
        .send()
        .await
        .expect("record scan");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("parse");
    assert_eq!(body["success"], true);

    // Manual recording is awaited on the server; no writer drain needed.
    let after: Value = client
        .get(format!("{base_url}/admin/dashboard-stats"))
        .send()
        .await
        .expect("stats")
        .json()
        .await
        .expect("parse");

    assert!(
        after["totalScans"].as_i64().unwrap_or(0) > before["totalScans"].as_i64().unwrap_or(0)
    );

    let _ = client
        .delete(format!("{base_url}/profile/{id}"))
        .send()
        .await;
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_record_scan_requires_profile_id() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/admin/record-scan"))
        .json(&json!({"location": "Expo Hall B"}))
        .send()
        .await
        .expect("record scan");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("parse");
    assert_eq!(body["message"], "Profile ID is required");
}

// ============================================================================
// Scan Analytics Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_scan_analytics_is_sparse_and_ascending() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/admin/scan-analytics?days=30"))
        .send()
        .await
        .expect("Failed to get scan analytics");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);

    let series = body["scanData"].as_array().expect("scanData array");
    let dates: Vec<&str> = series
        .iter()
        .map(|p| p["date"].as_str().expect("date string"))
        .collect();

    // Strictly ascending dates; no zero-count padding entries.
    for pair in dates.windows(2) {
        assert!(pair[0] < pair[1], "dates must be strictly ascending");
    }
    for point in series {
        assert!(point["scans"].as_i64().expect("scan count") > 0);
    }
}

// ============================================================================
// Profile Lifecycle Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_create_rejects_empty_name() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/profile"))
        .json(&json!({"ownerId": Uuid::new_v4(), "name": "   "}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_delete_keeps_event_history() {
    let client = client();
    let base_url = base_url();
    let id = create_test_profile(&client, "Deleted Jane").await;

    // Log a save, then delete the profile.
    let resp = client
        .post(format!("{base_url}/profile/log-save"))
        .json(&json!({"profileId": id}))
        .send()
        .await
        .expect("log save");
    assert_eq!(resp.status(), StatusCode::OK);

    tokio::time::sleep(std::time::Duration::from_millis(500)).await;

    let before: Value = client
        .get(format!("{base_url}/admin/dashboard-stats"))
        .send()
        .await
        .expect("stats")
        .json()
        .await
        .expect("parse");

    let resp = client
        .delete(format!("{base_url}/profile/{id}"))
        .send()
        .await
        .expect("delete");
    assert_eq!(resp.status(), StatusCode::OK);

    // Events referencing the dead id are kept (no cascading delete).
    let after: Value = client
        .get(format!("{base_url}/admin/dashboard-stats"))
        .send()
        .await
        .expect("stats")
        .json()
        .await
        .expect("parse");

    assert_eq!(
        before["totalSaves"].as_i64().unwrap_or(0),
        after["totalSaves"].as_i64().unwrap_or(0)
    );
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_export_profiles_is_a_json_attachment() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/admin/export-profiles"))
        .send()
        .await
        .expect("Failed to get export");

    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("trueline-profiles-export-"));

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}
