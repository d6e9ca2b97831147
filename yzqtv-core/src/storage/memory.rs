//! In-memory search history store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{SearchHistoryStore, StorageError, push_most_recent, remove_keyword};

/// Search history kept in process memory.
///
/// Lost on restart. Used for development and as the default backend.
#[derive(Debug, Clone)]
pub struct InMemorySearchHistoryStore {
    histories: Arc<RwLock<HashMap<String, Vec<String>>>>,
    retention_limit: usize,
}

impl InMemorySearchHistoryStore {
    /// Creates an empty store keeping at most `retention_limit` keywords per user.
    pub fn new(retention_limit: usize) -> Self {
        Self {
            histories: Arc::new(RwLock::new(HashMap::new())),
            retention_limit,
        }
    }
}

impl Default for InMemorySearchHistoryStore {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_HISTORY_LIMIT)
    }
}

#[async_trait]
impl SearchHistoryStore for InMemorySearchHistoryStore {
    async fn get_search_history(&self, user: &str) -> Result<Vec<String>, StorageError> {
        let histories = self.histories.read().await;
        Ok(histories.get(user).cloned().unwrap_or_default())
    }

    async fn add_search_history(&self, user: &str, keyword: &str) -> Result<(), StorageError> {
        let mut histories = self.histories.write().await;
        let entries = histories.entry(user.to_string()).or_default();
        push_most_recent(entries, keyword, self.retention_limit);
        Ok(())
    }

    async fn delete_search_history(
        &self,
        user: &str,
        keyword: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut histories = self.histories.write().await;
        if let Some(entries) = histories.get_mut(user) {
            remove_keyword(entries, keyword);
            if entries.is_empty() {
                histories.remove(user);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_histories_are_isolated_per_user() {
        let store = InMemorySearchHistoryStore::new(20);

        store.add_search_history("alice", "matrix").await.unwrap();
        store.add_search_history("bob", "inception").await.unwrap();

        assert_eq!(store.get_search_history("alice").await.unwrap(), vec!["matrix"]);
        assert_eq!(store.get_search_history("bob").await.unwrap(), vec!["inception"]);
        assert!(store.get_search_history("carol").await.unwrap().is_empty());
        assert_eq!(store.histories.read().await.len(), 2);
    }

    #[tokio::test]
    async fn test_most_recent_first_with_retention() {
        let store = InMemorySearchHistoryStore::new(2);

        store.add_search_history("alice", "a").await.unwrap();
        store.add_search_history("alice", "b").await.unwrap();
        store.add_search_history("alice", "c").await.unwrap();

        assert_eq!(store.get_search_history("alice").await.unwrap(), vec!["c", "b"]);
    }

    #[tokio::test]
    async fn test_delete_single_and_clear() {
        let store = InMemorySearchHistoryStore::default();
        store.add_search_history("alice", "a").await.unwrap();
        store.add_search_history("alice", "b").await.unwrap();

        store.delete_search_history("alice", Some("a")).await.unwrap();
        store.delete_search_history("alice", Some("a")).await.unwrap();
        assert_eq!(store.get_search_history("alice").await.unwrap(), vec!["b"]);

        store.delete_search_history("alice", None).await.unwrap();
        assert!(store.get_search_history("alice").await.unwrap().is_empty());
        assert!(store.histories.read().await.is_empty());
    }
}
