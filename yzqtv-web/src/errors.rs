//! Error types for the web layer and their HTTP translation.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use yzqtv_core::{SearchHistoryError, StorageError, ValidationError};

/// Public message for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Error returned from an API handler.
///
/// Internal failures carry no detail: it is logged where the error is built
/// and never reaches the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Caller input rejected
    #[error("{0}")]
    Validation(ValidationError),

    /// Anything else
    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    /// Logs `error` under `operation` and returns the generic internal error.
    pub fn internal(operation: &str, error: &dyn std::error::Error) -> Self {
        tracing::error!("{operation}: {error}");
        ApiError::Internal
    }

    /// Translates a service error, logging it if it is internal.
    pub fn from_history(operation: &str, error: SearchHistoryError) -> Self {
        match error {
            SearchHistoryError::Validation(validation) => ApiError::Validation(validation),
            SearchHistoryError::Internal(ref storage) => Self::internal(operation, storage),
        }
    }

    /// Status code and public message for this error.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Validation(validation) => (StatusCode::BAD_REQUEST, validation.to_string()),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Server lifecycle errors.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Listener could not be opened
    #[error("Failed to bind {address}: {source}")]
    BindFailed {
        /// Address that was requested
        address: String,
        /// Underlying socket error
        source: std::io::Error,
    },

    /// Server loop terminated with an error
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),

    /// Storage backend could not be opened
    #[error("Failed to initialize storage: {0}")]
    Storage(#[from] StorageError),
}
