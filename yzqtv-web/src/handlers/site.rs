//! Site branding endpoint

use axum::Json;
use axum::extract::State;
use yzqtv_core::SiteConfig;

use crate::server::AppState;

/// `GET /api/site`: branding values active for this server.
pub async fn site_info(State(state): State<AppState>) -> Json<SiteConfig> {
    Json(state.site_context.read().clone())
}
