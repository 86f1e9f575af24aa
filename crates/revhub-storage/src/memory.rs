//! In-memory asset store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use revhub_core::result::AppResult;
use revhub_core::traits::AssetStore;
use revhub_core::types::AssetKind;

/// Asset store holding live content in a map. For tests and
/// single-process trials; nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetStore {
    files: Arc<Mutex<HashMap<AssetKind, String>>>,
}

impl MemoryAssetStore {
    /// Create a store with no live content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with live content for one file.
    pub fn with_content(kind: AssetKind, content: &str) -> Self {
        let mut files = HashMap::new();
        files.insert(kind, content.to_string());
        Self {
            files: Arc::new(Mutex::new(files)),
        }
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    fn store_type(&self) -> &str {
        "memory"
    }

    async fn read(&self, kind: AssetKind) -> AppResult<Option<String>> {
        Ok(self.files.lock().await.get(&kind).cloned())
    }

    async fn write(&self, kind: AssetKind, content: &str) -> AppResult<()> {
        self.files.lock().await.insert(kind, content.to_string());
        Ok(())
    }

    async fn exists(&self, kind: AssetKind) -> AppResult<bool> {
        Ok(self.files.lock().await.contains_key(&kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_empty() {
        let store = MemoryAssetStore::new();
        assert_eq!(store.read(AssetKind::Script).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_with_content_seeds_one_file() {
        let store = MemoryAssetStore::with_content(AssetKind::Script, "seeded");
        assert_eq!(
            store.read(AssetKind::Script).await.unwrap().as_deref(),
            Some("seeded")
        );
        assert_eq!(store.read(AssetKind::Stylesheet).await.unwrap(), None);
    }
}
