//! Integration tests for the visitor-facing endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p trueline-server)
//!
//! Run with: cargo test -p trueline-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the server (configurable via environment).
fn base_url() -> String {
    std::env::var("TRUELINE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn client() -> Client {
    Client::builder().build().expect("Failed to create HTTP client")
}

/// Test helper: create a test profile via the admin API, returning its id.
async fn create_test_profile(client: &Client, name: &str) -> String {
    let base_url = base_url();
    let resp = client
        .post(format!("{base_url}/profile"))
        .json(&json!({
            "ownerId": Uuid::new_v4(),
            "name": name,
            "company": "Acme",
            "phones": [{"type": "mobile", "number": "555-1234"}],
        }))
        .send()
        .await
        .expect("Failed to create test profile");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse profile");
    body["id"].as_str().expect("profile id").to_string()
}

/// Test helper: delete a test profile via the admin API.
async fn delete_test_profile(client: &Client, profile_id: &str) {
    let base_url = base_url();
    let _ = client
        .delete(format!("{base_url}/profile/{profile_id}"))
        .send()
        .await;
}

// ============================================================================
// Public Profile Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_public_profile_excludes_owner() {
    let client = client();
    let base_url = base_url();
    let id = create_test_profile(&client, "Integration Jane").await;

    let resp = client
        .get(format!("{base_url}/public/{id}"))
        .send()
        .await
        .expect("Failed to get public profile");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["profile"]["name"], "Integration Jane");
    assert!(body["profile"].get("ownerId").is_none());
    assert!(body["profile"].get("owner_id").is_none());

    delete_test_profile(&client, &id).await;
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_public_profile_malformed_id_is_400() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/public/not-a-uuid"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_public_profile_unknown_id_is_404() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/public/{}", Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// vCard Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_vcf_download_headers_and_body() {
    let client = client();
    let base_url = base_url();
    let id = create_test_profile(&client, "Vcf Jane").await;

    let resp = client
        .get(format!("{base_url}/vcf/{id}"))
        .send()
        .await
        .expect("Failed to get vcf");

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/vcard"));
    assert!(resp.headers().contains_key("content-disposition"));
    assert!(resp.headers().contains_key("content-length"));

    let body = resp.text().await.expect("Failed to read body");
    assert!(body.starts_with("BEGIN:VCARD"));
    assert!(body.contains("FN:Vcf Jane"));
    assert!(body.contains("TEL;TYPE=MOBILE:555-1234"));

    delete_test_profile(&client, &id).await;
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_vcf_unknown_profile_is_404() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/vcf/{}", Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Save Logging Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_log_save_succeeds_for_unknown_profile() {
    let client = client();
    let base_url = base_url();

    // No existence check: an id absent from the store still gets a 200.
    let resp = client
        .post(format!("{base_url}/profile/log-save"))
        .json(&json!({"profileId": Uuid::new_v4()}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_log_save_malformed_id_is_400() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/profile/log-save"))
        .json(&json!({"profileId": "garbage"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
