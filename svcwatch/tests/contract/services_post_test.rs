//! Contract Test: POST /api/services

use crate::support::app::{build_app, build_app_with_store, send, send_request};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use std::sync::Arc;
use svcwatch::store::MemoryStore;
use uuid::Uuid;

#[tokio::test]
async fn create_service_returns_201_with_unknown_endpoints() {
    let test = build_app();

    let (status, body) = send(
        &test.app,
        "POST",
        "/api/services",
        Some(json!({
            "name": "api",
            "urls": ["http://a.example/health", "http://b.example/health"]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
    assert_eq!(body["name"], "api");

    let urls = body["urls"].as_array().unwrap();
    assert_eq!(urls.len(), 2);
    assert_eq!(urls[0]["url"], "http://a.example/health");
    assert_eq!(urls[1]["url"], "http://b.example/health");
    for endpoint in urls {
        assert!(Uuid::parse_str(endpoint["id"].as_str().unwrap()).is_ok());
        assert_eq!(endpoint["status"], "UNKNOWN");
        assert!(endpoint["lastPing"].is_null());
    }
    assert_ne!(urls[0]["id"], urls[1]["id"]);
    assert_eq!(test.store.save_count(), 1);
}

#[tokio::test]
async fn create_service_keeps_duplicate_urls() {
    let test = build_app();

    let (status, body) = send(
        &test.app,
        "POST",
        "/api/services",
        Some(json!({ "name": "dup", "urls": ["http://a.example", "http://a.example"] })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let urls = body["urls"].as_array().unwrap();
    assert_eq!(urls.len(), 2);
    assert_ne!(urls[0]["id"], urls[1]["id"]);
}

#[tokio::test]
async fn create_service_missing_fields_is_400() {
    let test = build_app();

    for payload in [
        json!({}),
        json!({ "name": "api" }),
        json!({ "urls": ["http://a.example"] }),
    ] {
        let (status, body) = send(&test.app, "POST", "/api/services", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Name and URLs array are required");
    }
    assert_eq!(test.store.save_count(), 0);
}

#[tokio::test]
async fn create_service_invalid_values_are_400() {
    let test = build_app();

    for payload in [
        json!({ "name": "   ", "urls": ["http://a.example"] }),
        json!({ "name": "api", "urls": [] }),
        json!({ "name": "api", "urls": ["not a url"] }),
        json!({ "name": "api", "urls": ["ftp://files.example"] }),
        json!({ "name": "api", "urls": ["http://a.example", ""] }),
    ] {
        let (status, body) = send(&test.app, "POST", "/api/services", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
    assert_eq!(test.store.save_count(), 0);

    let (_, listed) = send(&test.app, "GET", "/api/services", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn create_service_enforces_length_and_ascii_limits() {
    let test = build_app();
    let long_name = "n".repeat(41);
    let long_url = format!("http://a.example/{}", "p".repeat(256));

    for (payload, message) in [
        (
            json!({ "name": long_name, "urls": ["http://a.example"] }),
            "Name cannot be longer than 40 characters",
        ),
        (
            json!({ "name": "résumé", "urls": ["http://a.example"] }),
            "Name can only contain ASCII",
        ),
        (
            json!({ "name": "api", "urls": [long_url] }),
            "URL cannot be longer than 256 characters",
        ),
    ] {
        let (status, body) = send(&test.app, "POST", "/api/services", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], message);
    }
    assert_eq!(test.store.save_count(), 0);

    let (status, _) = send(
        &test.app,
        "POST",
        "/api/services",
        Some(json!({ "name": "n".repeat(40), "urls": ["http://a.example"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn create_service_malformed_json_is_400() {
    let test = build_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/services")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": \"api\", \"urls\": ["))
        .unwrap();
    let (status, body) = send_request(&test.app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(test.store.save_count(), 0);
}

#[tokio::test]
async fn create_service_save_failure_is_500() {
    let test = build_app_with_store(Arc::new(MemoryStore::new().failing_saves()));

    let (status, body) = send(
        &test.app,
        "POST",
        "/api/services",
        Some(json!({ "name": "api", "urls": ["http://a.example"] })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Storage error");
}
