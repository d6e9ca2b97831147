//! CLI command implementations

use std::path::PathBuf;
use std::sync::Arc;

use clap::Subcommand;
use yzqtv_core::storage::JsonFileSearchHistoryStore;
use yzqtv_core::{AppConfig, SearchHistoryService, StorageBackend, YzqError};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
        /// Storage backend (memory or file)
        #[arg(long)]
        storage: Option<StorageBackend>,
        /// History file for the file backend
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
    /// Inspect or edit the history file without a running server
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
}

/// Offline history file operations
#[derive(Subcommand)]
pub enum HistoryCommand {
    /// Print a user's history, most recent first
    List {
        /// User whose history to show
        #[arg(short, long)]
        user: String,
        /// History file to read
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
    /// Remove one keyword, or the whole history when no keyword is given
    Clear {
        /// User whose history to edit
        #[arg(short, long)]
        user: String,
        /// Keyword to remove
        #[arg(short, long)]
        keyword: Option<String>,
        /// History file to edit
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env();

    match command {
        Commands::Serve {
            host,
            port,
            storage,
            data_file,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(storage) = storage {
                config.storage.backend = storage;
            }
            if let Some(data_file) = data_file {
                config.storage.data_file = data_file;
            }
            yzqtv_web::run_server(config).await?;
            Ok(())
        }
        Commands::History { action } => {
            handle_history(action, &mut config).await?;
            Ok(())
        }
    }
}

async fn handle_history(
    action: HistoryCommand,
    config: &mut AppConfig,
) -> yzqtv_core::Result<()> {
    match action {
        HistoryCommand::List { user, data_file } => {
            let service = file_service(config, data_file).await?;
            let history = service.list(Some(user.as_str())).await?;

            if history.is_empty() {
                println!("No search history for {user}.");
            } else {
                for (index, keyword) in history.iter().enumerate() {
                    println!("{:>3}. {keyword}", index + 1);
                }
            }
            Ok(())
        }
        HistoryCommand::Clear {
            user,
            keyword,
            data_file,
        } => {
            let service = file_service(config, data_file).await?;
            service.delete(Some(user.as_str()), keyword.as_deref()).await?;

            match keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
                Some(keyword) => println!("Removed '{keyword}' from {user}'s history."),
                None => println!("Cleared search history for {user}."),
            }
            Ok(())
        }
    }
}

/// Service over the history file, regardless of the configured backend.
async fn file_service(
    config: &mut AppConfig,
    data_file: Option<PathBuf>,
) -> yzqtv_core::Result<SearchHistoryService> {
    if let Some(data_file) = data_file {
        config.storage.data_file = data_file;
    }
    if config.storage.data_file.as_os_str().is_empty() {
        return Err(YzqError::Configuration {
            reason: "history file path is empty".to_string(),
        });
    }

    let store = JsonFileSearchHistoryStore::open(
        &config.storage.data_file,
        config.storage.retention_limit,
        config.storage.temp_file_suffix,
    )
    .await?;

    Ok(SearchHistoryService::new(
        Arc::new(store),
        config.history.response_limit,
    ))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use yzqtv_core::storage::SearchHistoryStore;

    use super::*;

    #[tokio::test]
    async fn test_clear_keyword_edits_history_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let store = JsonFileSearchHistoryStore::open(&path, 20, ".tmp").await.unwrap();
        store.add_search_history("alice", "matrix").await.unwrap();
        store.add_search_history("alice", "alien").await.unwrap();

        let mut config = AppConfig::default();
        handle_history(
            HistoryCommand::Clear {
                user: "alice".to_string(),
                keyword: Some("matrix".to_string()),
                data_file: Some(path.clone()),
            },
            &mut config,
        )
        .await
        .unwrap();

        let reopened = JsonFileSearchHistoryStore::open(&path, 20, ".tmp").await.unwrap();
        assert_eq!(
            reopened.get_search_history("alice").await.unwrap(),
            vec!["alien"]
        );
    }

    #[tokio::test]
    async fn test_blank_user_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();

        let result = handle_history(
            HistoryCommand::List {
                user: "  ".to_string(),
                data_file: Some(dir.path().join("history.json")),
            },
            &mut config,
        )
        .await;

        let error = result.unwrap_err();
        assert!(error.is_user_error());
        assert_eq!(error.user_message(), "User parameter is required");
    }
}
