//! Contract Test: POST /api/services/:id/urls, DELETE /api/services/:id/urls/:url_id

use crate::support::app::{build_app, create_service, send};
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn add_url_appends_unknown_endpoint() {
    let test = build_app();
    let service = create_service(&test.app, "api", &["http://a.example"]).await;
    let uri = format!("/api/services/{}/urls", service["id"].as_str().unwrap());

    let (status, body) = send(
        &test.app,
        "POST",
        &uri,
        Some(json!({ "url": "https://b.example/health" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://b.example/health");
    assert_eq!(body["status"], "UNKNOWN");
    assert!(body["lastPing"].is_null());

    let (_, listed) = send(&test.app, "GET", "/api/services", None).await;
    let urls = listed[0]["urls"].as_array().unwrap();
    assert_eq!(urls.len(), 2);
    assert_eq!(urls[1], body);
}

#[tokio::test]
async fn add_url_validation() {
    let test = build_app();
    let service = create_service(&test.app, "api", &["http://a.example"]).await;
    let uri = format!("/api/services/{}/urls", service["id"].as_str().unwrap());

    let (status, body) = send(&test.app, "POST", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "URL is required");

    let (status, _) = send(&test.app, "POST", &uri, Some(json!({ "url": "nope" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(test.store.save_count(), 1);
}

#[tokio::test]
async fn add_url_unknown_service_is_404() {
    let test = build_app();
    let uri = format!("/api/services/{}/urls", Uuid::new_v4());

    let (status, body) = send(
        &test.app,
        "POST",
        &uri,
        Some(json!({ "url": "http://a.example" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Service not found");
}

#[tokio::test]
async fn remove_url_returns_204() {
    let test = build_app();
    let service = create_service(&test.app, "api", &["http://a.example", "http://b.example"]).await;
    let uri = format!(
        "/api/services/{}/urls/{}",
        service["id"].as_str().unwrap(),
        service["urls"][0]["id"].as_str().unwrap()
    );

    let (status, _) = send(&test.app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listed) = send(&test.app, "GET", "/api/services", None).await;
    assert_eq!(listed[0]["urls"], json!([service["urls"][1]]));

    let (status, body) = send(&test.app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "URL not found");
}
