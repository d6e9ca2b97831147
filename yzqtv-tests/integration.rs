//! Integration tests for YZQ-TV
//!
//! Drive the full axum router in-process and check the HTTP contract of the
//! search history and site endpoints.

#[path = "integration/common.rs"]
mod common;

#[path = "integration/search_history_api.rs"]
mod search_history_api;

#[path = "integration/site_api.rs"]
mod site_api;

#[path = "integration/file_backend.rs"]
mod file_backend;
