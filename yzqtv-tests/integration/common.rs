//! Request helpers shared by the integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use yzqtv_core::{AppConfig, SearchHistoryStore, ServerComponents};
use yzqtv_web::{AppState, build_router};

/// Router backed by a fresh in-memory store with default settings.
pub async fn memory_router() -> Router {
    let components = ServerComponents::from_config(&AppConfig::for_testing())
        .await
        .expect("in-memory components");
    build_router(AppState::from(components))
}

/// Router backed by `store`.
pub fn router_with_store(config: &AppConfig, store: Arc<dyn SearchHistoryStore>) -> Router {
    build_router(AppState::from(ServerComponents::with_store(config, store)))
}

/// Sends one request and returns the status and parsed JSON body.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).expect("valid request"))
        .await
        .expect("router is infallible");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let json = serde_json::from_slice(&bytes).expect("JSON body");
    (status, json)
}

/// `GET /api/searchhistory?user=<user>`
pub async fn list(router: &Router, user: &str) -> (StatusCode, Value) {
    let uri = format!("/api/searchhistory?user={}", urlencoding::encode(user));
    send(router, Method::GET, &uri, None).await
}

/// `POST /api/searchhistory`
pub async fn add(router: &Router, user: &str, keyword: &str) -> (StatusCode, Value) {
    let body = serde_json::json!({ "user": user, "keyword": keyword });
    send(router, Method::POST, "/api/searchhistory", Some(body)).await
}

/// `DELETE /api/searchhistory?user=<user>[&keyword=<keyword>]`
pub async fn delete(router: &Router, user: &str, keyword: Option<&str>) -> (StatusCode, Value) {
    let mut uri = format!("/api/searchhistory?user={}", urlencoding::encode(user));
    if let Some(keyword) = keyword {
        uri.push_str(&format!("&keyword={}", urlencoding::encode(keyword)));
    }
    send(router, Method::DELETE, &uri, None).await
}
