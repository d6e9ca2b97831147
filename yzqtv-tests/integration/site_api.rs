//! `/api/site` and the site context seen by the server.

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;
use yzqtv_core::storage::InMemorySearchHistoryStore;
use yzqtv_core::{AppConfig, SiteConfig, SiteContext};

use crate::common::{memory_router, router_with_store, send};

#[tokio::test]
async fn test_default_site_values() {
    let router = memory_router().await;

    let (status, body) = send(&router, Method::GET, "/api/site", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "siteName": "YZQ-TV", "announcement": "欢迎来到我搭建的影视网站" })
    );
}

#[tokio::test]
async fn test_configured_site_values() {
    let mut config = AppConfig::for_testing();
    config.site = SiteConfig::new("Night Cinema", None);
    let router = router_with_store(&config, Arc::new(InMemorySearchHistoryStore::default()));

    let (_, body) = send(&router, Method::GET, "/api/site", None).await;
    assert_eq!(body, json!({ "siteName": "Night Cinema" }));
}

#[test]
fn test_scope_restores_outer_value() {
    let root = SiteContext::root();
    let app = root.provide(SiteConfig::new("App", Some("hello".to_string())));

    let seen = app.scope(SiteConfig::new("Preview", None), |preview| {
        preview.read().clone()
    });

    assert_eq!(seen, SiteConfig::new("Preview", None));
    assert_eq!(app.read().site_name, "App");
    assert_eq!(root.read().site_name, "YZQ-TV");
}
