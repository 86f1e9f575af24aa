//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod logging;
pub mod retention;
pub mod storage;
pub mod worker;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::retention::RetentionConfig;
use self::storage::StorageConfig;
use self::worker::WorkerConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay). Every
/// section has working defaults so the binary runs without any file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Revision persistence settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Live asset file storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Revision retention settings.
    #[serde(default)]
    pub retention: RetentionConfig,
    /// Background worker settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Revision persistence configuration.
///
/// `provider` selects the repository backend: `"postgres"` for a shared
/// PostgreSQL deployment, `"memory"` for single-process trials and tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Repository backend: `"postgres"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// PostgreSQL connection URL.
    #[serde(default = "default_url")]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            url: default_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `REVHUB_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("REVHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

fn default_provider() -> String {
    "postgres".to_string()
}

fn default_url() -> String {
    "postgres://localhost:5432/revhub".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_files_yields_defaults() {
        let config = AppConfig::load("no_such_environment").expect("defaults should apply");
        assert_eq!(config.database.provider, "postgres");
        assert_eq!(config.retention.max_revisions_per_file, 50);
        assert_eq!(config.retention.max_age_days, 90);
        assert!(config.worker.enabled);
    }
}
