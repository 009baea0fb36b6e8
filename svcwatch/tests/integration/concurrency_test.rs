//! 同時リクエストで更新が失われないこと

use crate::support::http::spawn_server;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::HashSet;
use svcwatch::common::config::MonitorConfig;
use svcwatch::server::build_state;

#[tokio::test]
async fn concurrent_creates_are_all_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let config = MonitorConfig {
        data_file: dir.path().join("services_storage.json"),
        ..MonitorConfig::default()
    };
    let server = spawn_server(build_state(&config).await.unwrap()).await;
    let client = reqwest::Client::new();

    let requests = (0..16).map(|i| {
        let client = client.clone();
        let url = server.url("/api/services");
        tokio::spawn(async move {
            client
                .post(url)
                .json(&json!({
                    "name": format!("service-{}", i),
                    "urls": [format!("http://host-{}.example", i)]
                }))
                .send()
                .await
                .unwrap()
                .status()
        })
    });
    for handle in requests.collect::<Vec<_>>() {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    let listed: Value = client
        .get(server.url("/api/services"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: HashSet<String> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names.len(), 16);
    for i in 0..16 {
        assert!(names.contains(&format!("service-{}", i)));
    }

    server.stop().await;
}
