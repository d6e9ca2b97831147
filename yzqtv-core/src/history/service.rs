//! Search history service.

use std::sync::Arc;

use super::errors::{SearchHistoryError, ValidationError};
use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::storage::SearchHistoryStore;

/// Validating front for a [`SearchHistoryStore`].
///
/// Holds no state of its own; every call goes straight to the store.
#[derive(Debug, Clone)]
pub struct SearchHistoryService {
    store: Arc<dyn SearchHistoryStore>,
    response_limit: usize,
}

impl SearchHistoryService {
    /// Creates a service returning at most `response_limit` keywords from adds.
    pub fn new(store: Arc<dyn SearchHistoryStore>, response_limit: usize) -> Self {
        Self {
            store,
            response_limit,
        }
    }

    /// Creates a service with the standard cap of 20.
    pub fn with_default_limit(store: Arc<dyn SearchHistoryStore>) -> Self {
        Self::new(store, DEFAULT_HISTORY_LIMIT)
    }

    /// Returns the stored history for `user` as the store reports it.
    ///
    /// # Errors
    /// - `SearchHistoryError::Validation` - `user` missing or blank
    /// - `SearchHistoryError::Internal` - Store failed
    pub async fn list(&self, user: Option<&str>) -> Result<Vec<String>, SearchHistoryError> {
        let user = require_user(user)?;
        Ok(self.store.get_search_history(user).await?)
    }

    /// Records `keyword` for `user` and returns the refreshed, capped history.
    ///
    /// The keyword is checked before the user.
    ///
    /// # Errors
    /// - `SearchHistoryError::Validation` - `keyword` or `user` missing or blank
    /// - `SearchHistoryError::Internal` - Store failed
    pub async fn add(
        &self,
        user: Option<&str>,
        keyword: Option<&str>,
    ) -> Result<Vec<String>, SearchHistoryError> {
        let keyword = trimmed(keyword).ok_or(ValidationError::MissingKeyword)?;
        let user = require_user(user)?;

        self.store.add_search_history(user, keyword).await?;

        let mut history = self.store.get_search_history(user).await?;
        history.truncate(self.response_limit);
        Ok(history)
    }

    /// Removes one keyword for `user`, or all of them when `keyword` is
    /// missing or blank.
    ///
    /// # Errors
    /// - `SearchHistoryError::Validation` - `user` missing or blank
    /// - `SearchHistoryError::Internal` - Store failed
    pub async fn delete(
        &self,
        user: Option<&str>,
        keyword: Option<&str>,
    ) -> Result<(), SearchHistoryError> {
        let user = require_user(user)?;
        self.store
            .delete_search_history(user, trimmed(keyword))
            .await?;
        Ok(())
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn require_user(user: Option<&str>) -> Result<&str, ValidationError> {
    trimmed(user).ok_or(ValidationError::MissingUser)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::storage::InMemorySearchHistoryStore;
    use crate::storage::test_fixtures::{FailingSearchHistoryStore, UnboundedSearchHistoryStore};

    fn memory_service() -> SearchHistoryService {
        SearchHistoryService::with_default_limit(Arc::new(InMemorySearchHistoryStore::default()))
    }

    fn assert_validation(
        result: Result<impl std::fmt::Debug, SearchHistoryError>,
        expected: ValidationError,
    ) {
        match result {
            Err(SearchHistoryError::Validation(actual)) => assert_eq!(actual, expected),
            other => panic!("expected {expected:?}, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_or_blank_user_rejected_everywhere() {
        let service = memory_service();

        for user in [None, Some(""), Some("   ")] {
            assert_validation(service.list(user).await, ValidationError::MissingUser);
            assert_validation(
                service.add(user, Some("matrix")).await,
                ValidationError::MissingUser,
            );
            assert_validation(service.delete(user, None).await, ValidationError::MissingUser);
        }
    }

    #[tokio::test]
    async fn test_add_checks_keyword_before_user() {
        let service = memory_service();

        assert_validation(service.add(None, None).await, ValidationError::MissingKeyword);
        assert_validation(
            service.add(Some("alice"), Some("  ")).await,
            ValidationError::MissingKeyword,
        );
    }

    #[tokio::test]
    async fn test_add_list_delete_scenario() {
        let service = memory_service();

        let added = service.add(Some("alice"), Some("matrix")).await.unwrap();
        assert_eq!(added, vec!["matrix"]);
        assert_eq!(service.list(Some("alice")).await.unwrap(), vec!["matrix"]);

        service.delete(Some("alice"), Some("matrix")).await.unwrap();
        assert!(service.list(Some("alice")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_values_are_trimmed_before_storage() {
        let service = memory_service();

        service.add(Some("  alice "), Some(" matrix  ")).await.unwrap();
        assert_eq!(service.list(Some("alice")).await.unwrap(), vec!["matrix"]);

        service.delete(Some("alice"), Some("  matrix ")).await.unwrap();
        assert!(service.list(Some("alice")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_keyword_on_delete_clears_all() {
        let service = memory_service();
        service.add(Some("alice"), Some("a")).await.unwrap();
        service.add(Some("alice"), Some("b")).await.unwrap();

        service.delete(Some("alice"), Some("   ")).await.unwrap();
        assert!(service.list(Some("alice")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_response_capped_when_store_keeps_more() {
        let store = Arc::new(UnboundedSearchHistoryStore::new());
        let service = SearchHistoryService::with_default_limit(store.clone());

        let mut last = Vec::new();
        for index in 0..30 {
            last = service
                .add(Some("alice"), Some(format!("kw{index}").as_str()))
                .await
                .unwrap();
        }

        assert_eq!(store.stored_len("alice").await, 30);
        assert_eq!(last.len(), 20);
        assert_eq!(last[0], "kw29");
        // List is a pass-through and is not capped.
        assert_eq!(service.list(Some("alice")).await.unwrap().len(), 30);
    }

    #[tokio::test]
    async fn test_store_failures_are_internal() {
        let service =
            SearchHistoryService::with_default_limit(Arc::new(FailingSearchHistoryStore));

        assert!(matches!(
            service.list(Some("alice")).await,
            Err(SearchHistoryError::Internal(_))
        ));
        assert!(matches!(
            service.add(Some("alice"), Some("matrix")).await,
            Err(SearchHistoryError::Internal(_))
        ));
        assert!(matches!(
            service.delete(Some("alice"), None).await,
            Err(SearchHistoryError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn test_validation_precedes_store_failure() {
        let service =
            SearchHistoryService::with_default_limit(Arc::new(FailingSearchHistoryStore));

        assert_validation(service.list(None).await, ValidationError::MissingUser);
    }

    proptest! {
        #[test]
        fn prop_add_response_never_exceeds_limit(
            keywords in proptest::collection::vec("[a-z]{1,6}", 1..60),
            limit in 1usize..25,
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let store = Arc::new(UnboundedSearchHistoryStore::new());
            let service = SearchHistoryService::new(store, limit);

            runtime.block_on(async {
                for keyword in &keywords {
                    let response = service
                        .add(Some("alice"), Some(keyword.as_str()))
                        .await
                        .unwrap();
                    prop_assert!(response.len() <= limit);
                    prop_assert_eq!(&response[0], keyword);
                }
                Ok::<(), TestCaseError>(())
            })?;
        }
    }
}
