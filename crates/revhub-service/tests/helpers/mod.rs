//! Shared fixtures for the service integration tests.
//!
//! Each test binary compiles this module separately and uses a subset of
//! it, hence the blanket `dead_code` allowance.
#![allow(dead_code)]

use std::sync::Arc;

use revhub_core::config::retention::RetentionConfig;
use revhub_core::types::AssetKind;
use revhub_database::{RepositoryProvider, RevisionRepository};
use revhub_entity::revision::Revision;
use revhub_service::{
    HistoryService, RequestContext, RestoreService, RetentionService, RevisionService,
};
use revhub_storage::MemoryAssetStore;

/// The full service stack wired against in-memory backends.
pub struct TestServices {
    pub repo: Arc<dyn RevisionRepository>,
    pub assets: Arc<MemoryAssetStore>,
    pub revisions: Arc<RevisionService>,
    pub history: Arc<HistoryService>,
    pub restore: Arc<RestoreService>,
    pub retention: Arc<RetentionService>,
}

impl TestServices {
    /// Build the stack with default retention bounds.
    pub fn new() -> Self {
        Self::with_retention(RetentionConfig::default())
    }

    /// Build the stack with explicit retention bounds.
    pub fn with_retention(config: RetentionConfig) -> Self {
        let provider = RepositoryProvider::in_memory();
        let repo = provider.revisions();
        let assets = Arc::new(MemoryAssetStore::new());

        let retention = Arc::new(RetentionService::new(repo.clone(), config));
        let revisions = Arc::new(RevisionService::new(repo.clone(), retention.clone()));
        let history = Arc::new(HistoryService::new(provider.restore_log(), repo.clone()));
        let restore = Arc::new(RestoreService::new(
            revisions.clone(),
            history.clone(),
            assets.clone(),
        ));

        Self {
            repo,
            assets,
            revisions,
            history,
            restore,
            retention,
        }
    }

    /// Save `content` as a new revision of `kind` for the default actor.
    pub async fn save(&self, kind: AssetKind, content: &str) -> Revision {
        self.revisions
            .create_revision(&ctx(), kind, content, None)
            .await
            .expect("create revision")
    }
}

/// Request context for the default test actor.
pub fn ctx() -> RequestContext {
    RequestContext::new("tester")
}
