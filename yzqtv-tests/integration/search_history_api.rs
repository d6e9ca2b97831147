//! HTTP contract of `/api/searchhistory`.

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;
use yzqtv_core::AppConfig;
use yzqtv_core::storage::test_fixtures::{FailingSearchHistoryStore, UnboundedSearchHistoryStore};

use crate::common::{add, delete, list, memory_router, router_with_store, send};

#[tokio::test]
async fn test_add_list_delete_scenario() {
    let router = memory_router().await;

    let (status, body) = add(&router, "alice", "matrix").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["matrix"]));

    let (status, body) = list(&router, "alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["matrix"]));

    let (status, body) = delete(&router, "alice", Some("matrix")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, body) = list(&router, "alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_missing_user_is_rejected_by_every_method() {
    let router = memory_router().await;
    let expected = json!({ "error": "User parameter is required" });

    for uri in [
        "/api/searchhistory",
        "/api/searchhistory?user=",
        "/api/searchhistory?user=%20%20",
    ] {
        let (status, body) = send(&router, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "GET {uri}");
        assert_eq!(body, expected);

        let (status, body) = send(&router, Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "DELETE {uri}");
        assert_eq!(body, expected);
    }

    for payload in [
        json!({ "keyword": "matrix" }),
        json!({ "keyword": "matrix", "user": "   " }),
    ] {
        let (status, body) =
            send(&router, Method::POST, "/api/searchhistory", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, expected);
    }
}

#[tokio::test]
async fn test_post_requires_keyword_first() {
    let router = memory_router().await;
    let expected = json!({ "error": "Keyword is required" });

    for payload in [
        json!({ "user": "alice" }),
        json!({ "user": "alice", "keyword": "  " }),
        json!({ "user": "alice", "keyword": null }),
        json!({}),
    ] {
        let (status, body) =
            send(&router, Method::POST, "/api/searchhistory", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, expected);
    }
}

#[tokio::test]
async fn test_post_response_capped_at_twenty() {
    let store = Arc::new(UnboundedSearchHistoryStore::new());
    let router = router_with_store(&AppConfig::for_testing(), store.clone());

    for index in 0..25 {
        add(&router, "alice", &format!("movie {index}")).await;
    }

    let (status, body) = add(&router, "alice", "latest").await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().expect("array body");
    assert_eq!(entries.len(), 20);
    assert_eq!(entries[0], "latest");
    assert_eq!(store.stored_len("alice").await, 26);
}

#[tokio::test]
async fn test_delete_keyword_keeps_other_entries() {
    let router = memory_router().await;
    add(&router, "alice", "matrix").await;
    add(&router, "alice", "alien").await;
    add(&router, "alice", "heat").await;

    delete(&router, "alice", Some("alien")).await;

    let (_, body) = list(&router, "alice").await;
    assert_eq!(body, json!(["heat", "matrix"]));
}

#[tokio::test]
async fn test_delete_without_keyword_clears_history() {
    let router = memory_router().await;
    add(&router, "alice", "matrix").await;
    add(&router, "alice", "alien").await;
    add(&router, "bob", "heat").await;

    let (status, body) = delete(&router, "alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    assert_eq!(list(&router, "alice").await.1, json!([]));
    assert_eq!(list(&router, "bob").await.1, json!(["heat"]));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let router = memory_router().await;
    add(&router, "alice", "matrix").await;

    for _ in 0..2 {
        let (status, body) = delete(&router, "alice", Some("matrix")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
    }
}

#[tokio::test]
async fn test_unicode_and_whitespace_are_normalized() {
    let router = memory_router().await;

    let (status, body) = add(&router, "  小明 ", "  流浪地球  ").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["流浪地球"]));

    assert_eq!(list(&router, "小明").await.1, json!(["流浪地球"]));
}

#[tokio::test]
async fn test_repeated_keyword_moves_to_front() {
    let router = memory_router().await;
    add(&router, "alice", "matrix").await;
    add(&router, "alice", "alien").await;

    let (_, body) = add(&router, "alice", "matrix").await;
    assert_eq!(body, json!(["matrix", "alien"]));
}

#[tokio::test]
async fn test_storage_failure_is_hidden_behind_500() {
    let router =
        router_with_store(&AppConfig::for_testing(), Arc::new(FailingSearchHistoryStore));

    let (status, body) = list(&router, "alice").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal Server Error" }));

    let (status, _) = add(&router, "alice", "matrix").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = delete(&router, "alice", Some("matrix")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // Validation still wins over storage failures.
    let (status, _) = delete(&router, "", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_repeated_query_parameters_use_first_value() {
    let router = memory_router().await;
    add(&router, "alice", "matrix").await;
    add(&router, "alice", "alien").await;
    add(&router, "bob", "heat").await;

    let (status, body) = send(
        &router,
        Method::GET,
        "/api/searchhistory?user=alice&user=bob",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["alien", "matrix"]));

    let (status, body) = send(
        &router,
        Method::DELETE,
        "/api/searchhistory?user=alice&keyword=matrix&keyword=alien",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    assert_eq!(list(&router, "alice").await.1, json!(["alien"]));
    assert_eq!(list(&router, "bob").await.1, json!(["heat"]));
}

#[tokio::test]
async fn test_repeated_blank_user_still_reports_json_error() {
    let router = memory_router().await;

    let (status, body) =
        send(&router, Method::GET, "/api/searchhistory?user=&user=alice", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "User parameter is required" }));
}

#[tokio::test]
async fn test_non_object_body_is_internal_error_and_stores_nothing() {
    let router = memory_router().await;

    for payload in [
        json!(["matrix", "alice"]),
        json!("matrix"),
        json!(42),
        json!({ "keyword": ["matrix"], "user": "alice" }),
    ] {
        let (status, body) =
            send(&router, Method::POST, "/api/searchhistory", Some(payload)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal Server Error" }));
    }

    assert_eq!(list(&router, "alice").await.1, json!([]));
}
