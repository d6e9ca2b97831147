//! Server component wiring for dependency injection.
//!
//! Builds the services the web layer needs from configuration, so the web
//! crate never has to know which storage backend is in use.

use std::sync::Arc;

use crate::backend::StorageBackend;
use crate::config::AppConfig;
use crate::history::SearchHistoryService;
use crate::site::SiteContext;
use crate::storage::{
    InMemorySearchHistoryStore, JsonFileSearchHistoryStore, SearchHistoryStore, StorageError,
};

/// Pre-configured server components.
#[derive(Debug, Clone)]
pub struct ServerComponents {
    pub history_service: SearchHistoryService,
    pub site_context: SiteContext,
    pub backend: StorageBackend,
}

impl ServerComponents {
    /// Builds components for the configured backend.
    ///
    /// The site context provides the configured site values on top of the
    /// built-in defaults.
    ///
    /// # Errors
    /// - `StorageError::CorruptData` - History file exists but cannot be parsed
    /// - `StorageError::Io` - History file cannot be read
    pub async fn from_config(config: &AppConfig) -> Result<Self, StorageError> {
        let store = open_store(config).await?;
        Ok(Self::with_store(config, store))
    }

    /// Builds components around an already constructed store.
    pub fn with_store(config: &AppConfig, store: Arc<dyn SearchHistoryStore>) -> Self {
        Self {
            history_service: SearchHistoryService::new(store, config.history.response_limit),
            site_context: SiteContext::root().provide(config.site.clone()),
            backend: config.storage.backend,
        }
    }
}

/// Opens the store selected by `config.storage.backend`.
///
/// # Errors
/// - `StorageError::CorruptData` - History file exists but cannot be parsed
/// - `StorageError::Io` - History file cannot be read
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn SearchHistoryStore>, StorageError> {
    let storage = &config.storage;
    let store: Arc<dyn SearchHistoryStore> = match storage.backend {
        StorageBackend::Memory => {
            Arc::new(InMemorySearchHistoryStore::new(storage.retention_limit))
        }
        StorageBackend::File => Arc::new(
            JsonFileSearchHistoryStore::open(
                &storage.data_file,
                storage.retention_limit,
                storage.temp_file_suffix,
            )
            .await?,
        ),
    };

    if storage.backend.is_persistent() {
        tracing::info!(
            "Search history backend: {} ({})",
            storage.backend,
            storage.data_file.display()
        );
    } else {
        tracing::warn!(
            "Search history backend: {} (history is lost on restart)",
            storage.backend
        );
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::site::SiteConfig;

    #[tokio::test]
    async fn test_memory_components() {
        let config = AppConfig::for_testing();
        let components = ServerComponents::from_config(&config).await.unwrap();

        assert_eq!(components.backend, StorageBackend::Memory);
        assert_eq!(components.site_context.read(), &SiteConfig::default());

        for index in 0..25 {
            components
                .history_service
                .add(Some("alice"), Some(format!("kw{index}").as_str()))
                .await
                .unwrap();
        }
        let history = components.history_service.list(Some("alice")).await.unwrap();
        assert_eq!(history.len(), 20);
    }

    #[tokio::test]
    async fn test_file_components_share_data_file() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::for_testing();
        config.storage.backend = StorageBackend::File;
        config.storage.data_file = dir.path().join("history.json");
        config.site = SiteConfig::new("Test Site", None);

        let components = ServerComponents::from_config(&config).await.unwrap();
        components
            .history_service
            .add(Some("alice"), Some("matrix"))
            .await
            .unwrap();

        let reopened = ServerComponents::from_config(&config).await.unwrap();
        assert_eq!(
            reopened.history_service.list(Some("alice")).await.unwrap(),
            vec!["matrix"]
        );
        assert_eq!(reopened.site_context.read().site_name, "Test Site");
    }
}
