//! Router running on the JSON file backend.

use std::path::PathBuf;

use axum::http::StatusCode;
use serde_json::json;
use tempfile::TempDir;
use yzqtv_core::{AppConfig, ServerComponents, StorageBackend};
use yzqtv_web::{AppState, build_router};

use crate::common::{add, delete, list};

async fn file_router(dir: &TempDir) -> axum::Router {
    router_on_file(dir.path().join("history.json")).await
}

async fn router_on_file(data_file: PathBuf) -> axum::Router {
    let mut config = AppConfig::for_testing();
    config.storage.backend = StorageBackend::File;
    config.storage.data_file = data_file;

    let components = ServerComponents::from_config(&config)
        .await
        .expect("file components");
    build_router(AppState::from(components))
}

#[tokio::test]
async fn test_history_survives_server_restart() {
    let dir = TempDir::new().unwrap();

    {
        let router = file_router(&dir).await;
        add(&router, "alice", "matrix").await;
        add(&router, "alice", "alien").await;
        delete(&router, "alice", Some("matrix")).await;
    }

    let router = file_router(&dir).await;
    let (status, body) = list(&router, "alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["alien"]));
}

#[tokio::test]
async fn test_file_backend_caps_retention() {
    let dir = TempDir::new().unwrap();
    let router = file_router(&dir).await;

    for index in 0..30 {
        add(&router, "alice", &format!("kw{index}")).await;
    }

    let (_, body) = list(&router, "alice").await;
    let entries = body.as_array().expect("array body");
    assert_eq!(entries.len(), 20);
    assert_eq!(entries[0], "kw29");
    assert_eq!(entries[19], "kw10");
}

#[tokio::test]
async fn test_failed_write_is_not_served_afterwards() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("sub");
    let router = router_on_file(data_dir.join("history.json")).await;
    add(&router, "alice", "matrix").await;

    std::fs::remove_dir_all(&data_dir).unwrap();
    std::fs::write(&data_dir, b"not a directory").unwrap();

    let (status, body) = add(&router, "alice", "alien").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal Server Error" }));

    let (status, _) = delete(&router, "alice", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = list(&router, "alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["matrix"]));
}
