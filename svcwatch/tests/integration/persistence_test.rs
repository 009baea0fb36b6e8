//! 再起動をまたいだ永続化と起動時の破損検出

use crate::support::http::spawn_server;
use reqwest::StatusCode;
use serde_json::{json, Value};
use svcwatch::common::config::MonitorConfig;
use svcwatch::common::error::MonitorError;
use svcwatch::server::build_state;

fn config_in(dir: &std::path::Path) -> MonitorConfig {
    MonitorConfig {
        data_file: dir.join("data").join("services_storage.json"),
        ..MonitorConfig::default()
    }
}

#[tokio::test]
async fn services_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let client = reqwest::Client::new();

    let server = spawn_server(build_state(&config).await.unwrap()).await;
    let response = client
        .post(server.url("/api/services"))
        .json(&json!({ "name": "search", "urls": ["http://search.example/health"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    server.stop().await;

    assert!(config.data_file.exists());

    let server = spawn_server(build_state(&config).await.unwrap()).await;
    let listed: Value = client
        .get(server.url("/api/services"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!([created]));
    server.stop().await;
}

#[tokio::test]
async fn document_is_a_json_array_of_services() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let client = reqwest::Client::new();

    let server = spawn_server(build_state(&config).await.unwrap()).await;
    client
        .post(server.url("/api/services"))
        .json(&json!({ "name": "search", "urls": ["http://search.example/health"] }))
        .send()
        .await
        .unwrap();
    server.stop().await;

    let document: Value =
        serde_json::from_str(&std::fs::read_to_string(&config.data_file).unwrap()).unwrap();
    let services = document.as_array().unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["name"], "search");
    assert_eq!(services[0]["urls"][0]["url"], "http://search.example/health");
    assert_eq!(services[0]["urls"][0]["status"], "UNKNOWN");
    assert!(services[0]["urls"][0]["lastPing"].is_null());
}

#[tokio::test]
async fn corrupt_document_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    std::fs::create_dir_all(config.data_file.parent().unwrap()).unwrap();
    std::fs::write(&config.data_file, "this is not json").unwrap();

    let result = build_state(&config).await;

    assert!(matches!(result, Err(MonitorError::CorruptStore(_))));
    // 破損ファイルは上書きしない
    assert_eq!(
        std::fs::read_to_string(&config.data_file).unwrap(),
        "this is not json"
    );
}
