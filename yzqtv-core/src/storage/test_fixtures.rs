//! Stores with scripted behavior for exercising error and cap handling.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{SearchHistoryStore, StorageError};

/// Store whose every operation fails.
#[derive(Debug, Default, Clone)]
pub struct FailingSearchHistoryStore;

#[async_trait]
impl SearchHistoryStore for FailingSearchHistoryStore {
    async fn get_search_history(&self, _user: &str) -> Result<Vec<String>, StorageError> {
        Err(unavailable())
    }

    async fn add_search_history(&self, _user: &str, _keyword: &str) -> Result<(), StorageError> {
        Err(unavailable())
    }

    async fn delete_search_history(
        &self,
        _user: &str,
        _keyword: Option<&str>,
    ) -> Result<(), StorageError> {
        Err(unavailable())
    }
}

fn unavailable() -> StorageError {
    StorageError::Unavailable {
        reason: "connection refused".to_string(),
    }
}

/// Store that appends without deduplicating or capping.
///
/// Newest entries go to the front so that the service's truncation keeps the
/// most recent ones.
#[derive(Debug, Default, Clone)]
pub struct UnboundedSearchHistoryStore {
    histories: Arc<RwLock<HashMap<String, Vec<String>>>>,
}

impl UnboundedSearchHistoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries held for `user`.
    pub async fn stored_len(&self, user: &str) -> usize {
        let histories = self.histories.read().await;
        histories.get(user).map_or(0, Vec::len)
    }
}

#[async_trait]
impl SearchHistoryStore for UnboundedSearchHistoryStore {
    async fn get_search_history(&self, user: &str) -> Result<Vec<String>, StorageError> {
        let histories = self.histories.read().await;
        Ok(histories.get(user).cloned().unwrap_or_default())
    }

    async fn add_search_history(&self, user: &str, keyword: &str) -> Result<(), StorageError> {
        let mut histories = self.histories.write().await;
        histories
            .entry(user.to_string())
            .or_default()
            .insert(0, keyword.to_string());
        Ok(())
    }

    async fn delete_search_history(
        &self,
        user: &str,
        keyword: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut histories = self.histories.write().await;
        if let Some(entries) = histories.get_mut(user) {
            super::remove_keyword(entries, keyword);
        }
        Ok(())
    }
}
