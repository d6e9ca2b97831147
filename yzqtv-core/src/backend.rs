//! Storage backend selection.

use serde::{Deserialize, Serialize};

/// Which search history store the server runs on.
///
/// Both backends expose the same interface; only durability differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackend {
    /// Histories live in process memory and vanish on restart
    Memory,
    /// Histories are persisted to a JSON file
    File,
}

impl StorageBackend {
    /// Check if histories survive a restart.
    pub fn is_persistent(self) -> bool {
        matches!(self, Self::File)
    }
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::Memory
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::File => write!(f, "file"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "file" | "json" => Ok(Self::File),
            _ => Err(format!(
                "Invalid storage backend: '{s}'. Valid options are: memory, file"
            )),
        }
    }
}
