//! Storage layer for per-user search history.
//!
//! Defines the collaborator interface the search history service talks to,
//! plus an in-memory backend and a JSON file backend.

pub mod json_file;
pub mod memory;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;

use async_trait::async_trait;
pub use json_file::JsonFileSearchHistoryStore;
pub use memory::InMemorySearchHistoryStore;

/// Persistence operations for search history keyed by user.
///
/// Implementations own the ordering and deduplication policy. Callers must
/// not assume anything beyond "the list comes back in the store's order".
#[async_trait]
pub trait SearchHistoryStore: Send + Sync + std::fmt::Debug {
    /// Returns the stored keywords for `user`, empty if none.
    ///
    /// # Errors
    ///
    /// - `StorageError::Io` - If the backing medium could not be read
    async fn get_search_history(&self, user: &str) -> Result<Vec<String>, StorageError>;

    /// Records `keyword` for `user`.
    ///
    /// # Errors
    ///
    /// - `StorageError::Io` - If the backing medium could not be written
    /// - `StorageError::Serialization` - If the history could not be encoded
    async fn add_search_history(&self, user: &str, keyword: &str) -> Result<(), StorageError>;

    /// Removes `keyword` for `user`, or every keyword when `keyword` is `None`.
    ///
    /// Removing something that is not there succeeds.
    ///
    /// # Errors
    ///
    /// - `StorageError::Io` - If the backing medium could not be written
    /// - `StorageError::Serialization` - If the history could not be encoded
    async fn delete_search_history(
        &self,
        user: &str,
        keyword: Option<&str>,
    ) -> Result<(), StorageError>;
}

/// Errors that occur during search history persistence.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Data file exists but does not hold a valid history document
    #[error("Corrupt history file {path}: {reason}")]
    CorruptData {
        /// Path of the offending file
        path: String,
        /// Parser message
        reason: String,
    },

    /// History could not be encoded for writing
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend refused or failed the operation
    #[error("Storage backend unavailable: {reason}")]
    Unavailable {
        /// Description of the failure
        reason: String,
    },

    /// Standard I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Moves `keyword` to the front of `entries`, dropping older duplicates and
/// anything past `retention_limit`.
pub fn push_most_recent(entries: &mut Vec<String>, keyword: &str, retention_limit: usize) {
    entries.retain(|existing| existing != keyword);
    entries.insert(0, keyword.to_string());
    entries.truncate(retention_limit);
}

/// Removes `keyword` from `entries`, or clears them when `keyword` is `None`.
pub fn remove_keyword(entries: &mut Vec<String>, keyword: Option<&str>) {
    match keyword {
        Some(keyword) => entries.retain(|existing| existing != keyword),
        None => entries.clear(),
    }
}
