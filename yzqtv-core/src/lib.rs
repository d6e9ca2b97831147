//! YZQ-TV Core - search history and site context
//!
//! This crate provides the building blocks behind the YZQ-TV API: the
//! per-user search history service and its storage backends, the site
//! branding context, configuration and tracing setup.

pub mod backend;
pub mod config;
pub mod history;
pub mod server_components;
pub mod site;
pub mod storage;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use backend::StorageBackend;
pub use config::{AppConfig, DEFAULT_HISTORY_LIMIT};
pub use history::{SearchHistoryError, SearchHistoryService, ValidationError};
pub use server_components::ServerComponents;
pub use site::{SiteConfig, SiteContext};
pub use storage::{SearchHistoryStore, StorageError};

/// Core errors that can bubble up from any YZQ-TV subsystem.
#[derive(Debug, thiserror::Error)]
pub enum YzqError {
    #[error("Search history error: {0}")]
    SearchHistory(#[from] SearchHistoryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl YzqError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            YzqError::SearchHistory(SearchHistoryError::Validation(e)) => e.to_string(),
            YzqError::SearchHistory(SearchHistoryError::Internal(_)) | YzqError::Storage(_) => {
                "Search history storage is unavailable".to_string()
            }
            YzqError::Configuration { reason } => format!("Invalid configuration: {reason}"),
            YzqError::Io(_) => "File system error occurred".to_string(),
        }
    }

    /// Checks if this error is due to user input validation.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            YzqError::Configuration { .. }
                | YzqError::SearchHistory(SearchHistoryError::Validation(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, YzqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_storage_detail() {
        let error = YzqError::from(StorageError::Unavailable {
            reason: "redis down at 10.0.0.3".to_string(),
        });

        assert!(!error.user_message().contains("10.0.0.3"));
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_validation_is_user_error() {
        let error = YzqError::from(SearchHistoryError::from(ValidationError::MissingKeyword));

        assert!(error.is_user_error());
        assert_eq!(error.user_message(), "Keyword is required");
    }
}
