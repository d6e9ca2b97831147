//! JSON API server for YZQ-TV
//!
//! Wires the search history and site handlers onto an axum router and runs
//! it on a tokio listener.

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use yzqtv_core::{AppConfig, SearchHistoryService, ServerComponents, SiteContext};

use crate::errors::WebError;
use crate::handlers::{
    add_search_history, delete_search_history, list_search_history, site_info,
};

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Search history front end
    pub history_service: SearchHistoryService,
    /// Site branding scope for this server
    pub site_context: SiteContext,
}

impl From<ServerComponents> for AppState {
    fn from(components: ServerComponents) -> Self {
        Self {
            history_service: components.history_service,
            site_context: components.site_context,
        }
    }
}

/// Builds the API router around `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/searchhistory",
            get(list_search_history)
                .post(add_search_history)
                .delete(delete_search_history),
        )
        .route("/api/site", get(site_info))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the API on an already bound listener until the server stops.
///
/// # Errors
/// - `WebError::Serve` - Server loop failed
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), WebError> {
    let app = build_router(state);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Opens storage from `config`, binds the configured address and serves.
///
/// # Errors
/// - `WebError::Storage` - Storage backend could not be opened
/// - `WebError::BindFailed` - Address already in use or not available
/// - `WebError::Serve` - Server loop failed
pub async fn run_server(config: AppConfig) -> Result<(), WebError> {
    let components = ServerComponents::from_config(&config).await?;

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| WebError::BindFailed {
            address: address.clone(),
            source,
        })?;

    let local_address = listener.local_addr()?;
    tracing::info!(
        "{} API running on http://{local_address} ({} storage)",
        components.site_context.read().site_name,
        components.backend
    );

    serve(listener, AppState::from(components)).await
}
