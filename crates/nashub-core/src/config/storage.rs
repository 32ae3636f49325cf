//! Storage configuration.

use serde::{Deserialize, Serialize};

/// File storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory every file and share operation is confined to.
    #[serde(default = "default_root")]
    pub root: String,
    /// Create the root directory on startup when it is missing.
    #[serde(default = "default_true")]
    pub create_root: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            create_root: true,
        }
    }
}

fn default_root() -> String {
    "./data/shared".to_string()
}

fn default_true() -> bool {
    true
}
