//! YZQ-TV Web - JSON API Server

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Serves the per-user search history endpoints and the site branding
//! values as JSON.

pub mod errors;
pub mod handlers;
pub mod server;

// Re-export main types
pub use errors::{ApiError, WebError};
pub use server::{AppState, build_router, run_server, serve};
