//! Error types for search history operations.

use thiserror::Error;

use crate::storage::StorageError;

/// A required request field was missing or blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No usable `user` identifier.
    #[error("User parameter is required")]
    MissingUser,

    /// No usable `keyword` on an add.
    #[error("Keyword is required")]
    MissingKeyword,
}

/// Errors that can occur while serving a search history operation.
#[derive(Debug, Error)]
pub enum SearchHistoryError {
    /// Caller input was rejected before touching storage.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage collaborator failed.
    #[error("Search history storage failed: {0}")]
    Internal(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_public_text() {
        assert_eq!(
            ValidationError::MissingUser.to_string(),
            "User parameter is required"
        );
        assert_eq!(
            ValidationError::MissingKeyword.to_string(),
            "Keyword is required"
        );
        assert_eq!(
            SearchHistoryError::from(ValidationError::MissingUser).to_string(),
            "User parameter is required"
        );
    }

    #[test]
    fn test_storage_failure_is_not_validation() {
        let error = SearchHistoryError::from(StorageError::Unavailable {
            reason: "down".to_string(),
        });
        assert!(matches!(error, SearchHistoryError::Internal(_)));
        assert!(error.to_string().contains("down"));
    }
}
