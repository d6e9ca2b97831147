//! End-to-end tests against a live listener.

use std::net::SocketAddr;

use serde_json::{Value, json};
use tokio::net::TcpListener;
use yzqtv_core::{AppConfig, ServerComponents};
use yzqtv_web::{AppState, serve};

async fn spawn_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    let components = ServerComponents::from_config(&AppConfig::for_testing())
        .await
        .expect("components");

    tokio::spawn(serve(listener, AppState::from(components)));
    address
}

#[tokio::test]
async fn test_search_history_over_http() {
    let address = spawn_server().await;
    let base = format!("http://{address}/api/searchhistory");
    let client = reqwest::Client::new();

    let response = client
        .post(&base)
        .json(&json!({ "user": "alice", "keyword": "matrix" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<Value>().await.unwrap(), json!(["matrix"]));

    let response = client
        .get(&base)
        .query(&[("user", "alice")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.json::<Value>().await.unwrap(), json!(["matrix"]));

    let response = client
        .delete(&base)
        .query(&[("user", "alice"), ("keyword", "matrix")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({ "success": true })
    );

    let response = client
        .get(&base)
        .query(&[("user", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({ "error": "User parameter is required" })
    );
}

#[tokio::test]
async fn test_concurrent_adds_for_different_users() {
    let address = spawn_server().await;
    let base = format!("http://{address}/api/searchhistory");
    let client = reqwest::Client::new();

    let requests = (0..8).map(|index| {
        let client = client.clone();
        let base = base.clone();
        async move {
            client
                .post(&base)
                .json(&json!({ "user": format!("user{index}"), "keyword": "matrix" }))
                .send()
                .await
                .unwrap()
                .status()
        }
    });

    for status in futures::future::join_all(requests).await {
        assert_eq!(status, 200);
    }

    for index in 0..8 {
        let body: Value = client
            .get(&base)
            .query(&[("user", format!("user{index}"))])
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body, json!(["matrix"]));
    }
}
