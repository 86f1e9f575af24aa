//! Repository provider that dispatches to the configured backend.

use std::sync::Arc;

use tracing::info;

use revhub_core::config::DatabaseConfig;
use revhub_core::error::AppError;
use revhub_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryRestoreLogRepository, MemoryRevisionRepository};
use crate::repositories::{
    PostgresRestoreLogRepository, PostgresRevisionRepository, RestoreLogRepository,
    RevisionRepository,
};

/// Repository provider that wraps the configured persistence backend.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct RepositoryProvider {
    /// Revision chain persistence.
    revisions: Arc<dyn RevisionRepository>,
    /// Restore log persistence.
    restore_log: Arc<dyn RestoreLogRepository>,
    /// The pool behind the PostgreSQL backend, absent for memory.
    pool: Option<DatabasePool>,
}

impl RepositoryProvider {
    /// Connect the repository backend named in the configuration.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "postgres" => {
                info!("Initializing PostgreSQL repositories");
                let pool = DatabasePool::connect(config).await?;
                let revisions = PostgresRevisionRepository::new(pool.pool().clone());
                let restore_log = PostgresRestoreLogRepository::new(pool.pool().clone());
                Ok(Self {
                    revisions: Arc::new(revisions),
                    restore_log: Arc::new(restore_log),
                    pool: Some(pool),
                })
            }
            "memory" => {
                info!("Initializing in-memory repositories");
                Ok(Self::in_memory())
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    /// Build a provider backed entirely by in-memory state.
    pub fn in_memory() -> Self {
        let revisions = MemoryRevisionRepository::new();
        let restore_log = MemoryRestoreLogRepository::new(revisions.clone());
        Self {
            revisions: Arc::new(revisions),
            restore_log: Arc::new(restore_log),
            pool: None,
        }
    }

    /// The revision repository.
    pub fn revisions(&self) -> Arc<dyn RevisionRepository> {
        Arc::clone(&self.revisions)
    }

    /// The restore log repository.
    pub fn restore_log(&self) -> Arc<dyn RestoreLogRepository> {
        Arc::clone(&self.restore_log)
    }

    /// The PostgreSQL pool, when that backend is active.
    pub fn pool(&self) -> Option<&DatabasePool> {
        self.pool.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_provider_is_rejected() {
        let config = DatabaseConfig {
            provider: "sqlite".to_string(),
            ..DatabaseConfig::default()
        };
        let err = RepositoryProvider::connect(&config).await.unwrap_err();
        assert_eq!(err.kind, revhub_core::error::ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_memory_provider_has_no_pool() {
        let config = DatabaseConfig {
            provider: "memory".to_string(),
            ..DatabaseConfig::default()
        };
        let provider = RepositoryProvider::connect(&config).await.unwrap();
        assert!(provider.pool().is_none());
    }
}
