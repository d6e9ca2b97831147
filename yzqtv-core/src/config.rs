//! Centralized configuration for YZQ-TV.
//!
//! All tunable parameters are defined here so that defaults live in one
//! place and environment overrides are applied consistently.

use std::path::PathBuf;

use crate::backend::StorageBackend;
use crate::site::SiteConfig;

/// Maximum number of keywords returned to a caller after an add.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Central configuration for all YZQ-TV components.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub history: HistoryConfig,
    pub site: SiteConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind to
    pub host: String,
    /// Port to bind to (0 picks a free port)
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Search history persistence configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Backend used by the server
    pub backend: StorageBackend,
    /// History file used by the file backend
    pub data_file: PathBuf,
    /// Keywords kept per user by the bundled stores
    pub retention_limit: usize,
    /// Suffix of the scratch file written before an atomic rename
    pub temp_file_suffix: &'static str,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_file: PathBuf::from("data/search-history.json"),
            retention_limit: DEFAULT_HISTORY_LIMIT,
            temp_file_suffix: ".tmp",
        }
    }
}

/// Response shaping for the search history API.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Cap applied to the list returned by an add
    pub response_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            response_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl AppConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Values that fail to parse are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("YZQTV_HOST") {
            if !host.trim().is_empty() {
                config.server.host = host.trim().to_string();
            }
        }

        if let Ok(port) = std::env::var("YZQTV_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.server.port = port;
            }
        }

        if let Ok(backend) = std::env::var("YZQTV_STORAGE") {
            match backend.parse::<StorageBackend>() {
                Ok(backend) => config.storage.backend = backend,
                Err(e) => tracing::warn!("Ignoring YZQTV_STORAGE: {e}"),
            }
        }

        if let Ok(path) = std::env::var("YZQTV_DATA_FILE") {
            if !path.trim().is_empty() {
                config.storage.data_file = PathBuf::from(path);
            }
        }

        if let Ok(limit) = std::env::var("YZQTV_HISTORY_RETENTION") {
            if let Ok(limit) = limit.parse::<usize>() {
                if limit > 0 {
                    config.storage.retention_limit = limit;
                }
            }
        }

        if let Ok(site_name) = std::env::var("YZQTV_SITE_NAME") {
            if !site_name.trim().is_empty() {
                config.site.site_name = site_name;
            }
        }

        if let Ok(announcement) = std::env::var("YZQTV_ANNOUNCEMENT") {
            config.site.announcement = if announcement.trim().is_empty() {
                None
            } else {
                Some(announcement)
            };
        }

        config
    }

    /// Creates a configuration for tests: memory storage on an ephemeral port.
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            ..Default::default()
        }
    }
}
