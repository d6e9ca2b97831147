//! JSON file backed search history store.
//!
//! The whole document is held in memory and rewritten on every change.
//! Writes go to a sibling temp file first and are renamed into place, so a
//! crash mid-write leaves the previous document intact.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;

use super::{SearchHistoryStore, StorageError, push_most_recent, remove_keyword};

const DOCUMENT_VERSION: u32 = 1;

/// On-disk layout of the history file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HistoryDocument {
    version: u32,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    users: BTreeMap<String, Vec<String>>,
}

impl HistoryDocument {
    fn empty() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            updated_at: Utc::now(),
            users: BTreeMap::new(),
        }
    }
}

/// Search history persisted to a single JSON file.
#[derive(Debug)]
pub struct JsonFileSearchHistoryStore {
    path: PathBuf,
    temp_file_suffix: String,
    retention_limit: usize,
    document: Mutex<HistoryDocument>,
}

impl JsonFileSearchHistoryStore {
    /// Opens the store at `path`, starting empty if the file does not exist.
    ///
    /// # Errors
    ///
    /// - `StorageError::CorruptData` - If the file exists but is not a history document
    /// - `StorageError::Io` - If the file could not be read
    pub async fn open(
        path: impl Into<PathBuf>,
        retention_limit: usize,
        temp_file_suffix: &str,
    ) -> Result<Self, StorageError> {
        let path = path.into();
        let document: HistoryDocument = match fs::read(&path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| StorageError::CorruptData {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No history file at {}, starting empty", path.display());
                HistoryDocument::empty()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            "Opened search history file {} ({} users)",
            path.display(),
            document.users.len()
        );

        Ok(Self {
            path,
            temp_file_suffix: temp_file_suffix.to_string(),
            retention_limit,
            document: Mutex::new(document),
        })
    }

    /// Writes `document` to disk, stamping it with the write time.
    async fn flush(&self, document: &mut HistoryDocument) -> Result<(), StorageError> {
        document.updated_at = Utc::now();
        let encoded = serde_json::to_vec_pretty(&*document)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut temp_path = self.path.clone().into_os_string();
        temp_path.push(&self.temp_file_suffix);
        let temp_path = PathBuf::from(temp_path);

        fs::write(&temp_path, encoded).await?;
        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }

    /// Applies `change` to a copy of the document and keeps it only once it
    /// is on disk. A failed write leaves the served history untouched.
    async fn commit<F>(&self, change: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut HistoryDocument) -> bool,
    {
        let mut document = self.document.lock().await;
        let mut updated = document.clone();
        if !change(&mut updated) {
            return Ok(());
        }

        if let Err(e) = self.flush(&mut updated).await {
            tracing::warn!("Failed to write {}: {e}", self.path.display());
            return Err(e);
        }
        *document = updated;
        Ok(())
    }
}

#[async_trait]
impl SearchHistoryStore for JsonFileSearchHistoryStore {
    async fn get_search_history(&self, user: &str) -> Result<Vec<String>, StorageError> {
        let document = self.document.lock().await;
        Ok(document.users.get(user).cloned().unwrap_or_default())
    }

    async fn add_search_history(&self, user: &str, keyword: &str) -> Result<(), StorageError> {
        let retention_limit = self.retention_limit;
        self.commit(|document| {
            let entries = document.users.entry(user.to_string()).or_default();
            push_most_recent(entries, keyword, retention_limit);
            true
        })
        .await
    }

    async fn delete_search_history(
        &self,
        user: &str,
        keyword: Option<&str>,
    ) -> Result<(), StorageError> {
        self.commit(|document| {
            let Some(entries) = document.users.get_mut(user) else {
                return false;
            };
            remove_keyword(entries, keyword);
            if entries.is_empty() {
                document.users.remove(user);
            }
            true
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let store = JsonFileSearchHistoryStore::open(&path, 20, ".tmp").await.unwrap();

        assert!(store.get_search_history("alice").await.unwrap().is_empty());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_history_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("history.json");

        {
            let store = JsonFileSearchHistoryStore::open(&path, 20, ".tmp").await.unwrap();
            store.add_search_history("alice", "matrix").await.unwrap();
            store.add_search_history("alice", "inception").await.unwrap();
            store.add_search_history("bob", "alien").await.unwrap();
            store.delete_search_history("bob", None).await.unwrap();
        }

        let reopened = JsonFileSearchHistoryStore::open(&path, 20, ".tmp").await.unwrap();
        assert_eq!(
            reopened.get_search_history("alice").await.unwrap(),
            vec!["inception", "matrix"]
        );
        assert!(reopened.get_search_history("bob").await.unwrap().is_empty());
        assert!(!dir.path().join("nested").join("history.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, b"not json").unwrap();

        let result = JsonFileSearchHistoryStore::open(&path, 20, ".tmp").await;
        assert!(matches!(result, Err(StorageError::CorruptData { .. })));
    }

    #[tokio::test]
    async fn test_deleting_unknown_user_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let store = JsonFileSearchHistoryStore::open(&path, 20, ".tmp").await.unwrap();

        store.delete_search_history("ghost", Some("x")).await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_history() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("sub");
        let path = data_dir.join("history.json");
        let store = JsonFileSearchHistoryStore::open(&path, 20, ".tmp").await.unwrap();
        store.add_search_history("alice", "matrix").await.unwrap();

        std::fs::remove_dir_all(&data_dir).unwrap();
        std::fs::write(&data_dir, b"not a directory").unwrap();

        assert!(store.add_search_history("alice", "alien").await.is_err());
        assert!(store.add_search_history("bob", "heat").await.is_err());
        assert!(store.delete_search_history("alice", None).await.is_err());

        assert_eq!(store.get_search_history("alice").await.unwrap(), vec!["matrix"]);
        assert!(store.get_search_history("bob").await.unwrap().is_empty());
    }
}
