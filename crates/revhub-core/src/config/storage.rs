//! Live asset storage configuration.

use serde::{Deserialize, Serialize};

/// Storage configuration for the live editable asset files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory holding the live asset files.
    #[serde(default = "default_root_path")]
    pub root_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
        }
    }
}

fn default_root_path() -> String {
    "./data/assets".to_string()
}
