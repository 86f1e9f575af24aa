//! Local filesystem asset store.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use revhub_core::config::storage::StorageConfig;
use revhub_core::error::{AppError, ErrorKind};
use revhub_core::result::AppResult;
use revhub_core::traits::AssetStore;
use revhub_core::types::AssetKind;

/// Filesystem-backed asset store.
///
/// Each managed file lives directly under the configured root at its
/// well-known name. Writes go through a temporary file and a rename so
/// a crash mid-write never leaves a half-written live asset.
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    /// Root directory holding the live files.
    root: PathBuf,
}

impl LocalAssetStore {
    /// Create a store rooted at the configured path, creating the
    /// directory if needed.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Absolute path of the live file for a kind.
    fn resolve(&self, kind: AssetKind) -> PathBuf {
        self.root.join(kind.file_name())
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    fn store_type(&self) -> &str {
        "local"
    }

    async fn read(&self, kind: AssetKind) -> AppResult<Option<String>> {
        match fs::read_to_string(self.resolve(kind)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read {}", kind.file_name()),
                e,
            )),
        }
    }

    async fn write(&self, kind: AssetKind, content: &str) -> AppResult<()> {
        let target = self.resolve(kind);
        let staging = self.root.join(format!(".{}.tmp", kind.file_name()));

        fs::write(&staging, content).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to stage write for {}", kind.file_name()),
                e,
            )
        })?;
        fs::rename(&staging, &target).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace {}", kind.file_name()),
                e,
            )
        })?;

        debug!(
            file = kind.file_name(),
            bytes = content.len(),
            "Wrote live asset"
        );
        Ok(())
    }

    async fn exists(&self, kind: AssetKind) -> AppResult<bool> {
        Ok(self.resolve(kind).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn make_store(dir: &tempfile::TempDir) -> LocalAssetStore {
        let config = StorageConfig {
            root_path: dir.path().to_string_lossy().into_owned(),
        };
        LocalAssetStore::new(&config).await.unwrap()
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;

        store
            .write(AssetKind::Script, "console.log('hi');\n")
            .await
            .unwrap();

        assert!(store.exists(AssetKind::Script).await.unwrap());
        let content = store.read(AssetKind::Script).await.unwrap();
        assert_eq!(content.as_deref(), Some("console.log('hi');\n"));
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;

        assert_eq!(store.read(AssetKind::Stylesheet).await.unwrap(), None);
        assert!(!store.exists(AssetKind::Stylesheet).await.unwrap());
    }

    #[tokio::test]
    async fn test_write_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;

        store.write(AssetKind::Script, "first").await.unwrap();
        store.write(AssetKind::Script, "second").await.unwrap();

        let content = store.read(AssetKind::Script).await.unwrap();
        assert_eq!(content.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_files_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;

        store.write(AssetKind::Script, "js").await.unwrap();
        store.write(AssetKind::Stylesheet, "css").await.unwrap();

        assert_eq!(
            store.read(AssetKind::Script).await.unwrap().as_deref(),
            Some("js")
        );
        assert_eq!(
            store.read(AssetKind::Stylesheet).await.unwrap().as_deref(),
            Some("css")
        );
    }
}
