//! Integration tests for saving, reconstructing, and deleting revisions.

mod helpers;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use helpers::{TestServices, ctx};
use revhub_core::config::retention::RetentionConfig;
use revhub_core::error::ErrorKind;
use revhub_core::result::AppResult;
use revhub_core::types::AssetKind;
use revhub_database::{RepositoryProvider, RevisionRepository};
use revhub_diff::compute_diff;
use revhub_entity::revision::{FileStats, NewRevision, Revision, RevisionSummary};
use revhub_service::{RetentionService, RevisionService};

#[tokio::test]
async fn test_first_revision_is_a_snapshot() {
    let t = TestServices::new();
    let created = t.save(AssetKind::Script, "a").await;

    assert_eq!(created.sequence_number, 1);
    assert!(!created.is_diff);

    let stored = t.repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.payload, "a");
}

#[tokio::test]
async fn test_later_revisions_store_diffs_and_reconstruct() {
    let t = TestServices::new();
    t.save(AssetKind::Script, "a").await;
    let second = t.save(AssetKind::Script, "a\nb").await;
    let third = t.save(AssetKind::Script, "a\nb\nc").await;

    assert!(second.is_diff);
    assert!(third.is_diff);

    let r = &t.revisions;
    assert_eq!(r.reconstruct(AssetKind::Script, 1).await.unwrap(), "a");
    assert_eq!(r.reconstruct(AssetKind::Script, 2).await.unwrap(), "a\nb");
    assert_eq!(r.reconstruct(AssetKind::Script, 3).await.unwrap(), "a\nb\nc");
}

#[tokio::test]
async fn test_sequences_are_contiguous_from_one() {
    let t = TestServices::new();
    for content in ["one", "two", "three", "four"] {
        t.save(AssetKind::Script, content).await;
    }

    let listed = t
        .revisions
        .list_revisions(AssetKind::Script, None)
        .await
        .unwrap();
    let sequences: Vec<i32> = listed.iter().map(|s| s.sequence_number).collect();
    assert_eq!(sequences, vec![4, 3, 2, 1]);

    let bounds = t.repo.sequence_bounds(AssetKind::Script).await.unwrap();
    assert_eq!(bounds, Some((1, 4)));
}

#[tokio::test]
async fn test_empty_content_is_rejected_and_persists_nothing() {
    let t = TestServices::new();
    let err = t
        .revisions
        .create_revision(&ctx(), AssetKind::Script, "", None)
        .await
        .unwrap_err();

    assert!(err.is_kind(ErrorKind::Validation));
    assert_eq!(t.repo.count(AssetKind::Script).await.unwrap(), 0);
}

#[tokio::test]
async fn test_files_have_independent_chains() {
    let t = TestServices::new();
    let script = t.save(AssetKind::Script, "js").await;
    let stylesheet = t.save(AssetKind::Stylesheet, "css").await;

    assert_eq!(script.sequence_number, 1);
    assert_eq!(stylesheet.sequence_number, 1);

    let listed = t
        .revisions
        .list_revisions(AssetKind::Script, None)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(
        t.revisions
            .reconstruct(AssetKind::Stylesheet, 1)
            .await
            .unwrap(),
        "css"
    );
}

#[tokio::test]
async fn test_get_revision_content_by_id() {
    let t = TestServices::new();
    t.save(AssetKind::Script, "a").await;
    let second = t.save(AssetKind::Script, "a\nb").await;

    let content = t.revisions.get_revision_content(second.id).await.unwrap();
    assert_eq!(content, "a\nb");
}

#[tokio::test]
async fn test_reconstruct_unknown_sequence_is_not_found() {
    let t = TestServices::new();
    t.save(AssetKind::Script, "a").await;

    let err = t
        .revisions
        .reconstruct(AssetKind::Script, 7)
        .await
        .unwrap_err();
    assert!(err.is_kind(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_comment_and_actor_are_recorded() {
    let t = TestServices::new();
    let created = t
        .revisions
        .create_revision(&ctx(), AssetKind::Script, "a", Some("initial draft"))
        .await
        .unwrap();

    assert_eq!(created.comment.as_deref(), Some("initial draft"));
    assert_eq!(created.created_by, "tester");
}

#[tokio::test]
async fn test_delete_newest_leaves_chain_intact() {
    let t = TestServices::new();
    t.save(AssetKind::Script, "a").await;
    t.save(AssetKind::Script, "a\nb").await;
    let third = t.save(AssetKind::Script, "a\nb\nc").await;

    t.revisions.delete_revision(third.id).await.unwrap();

    assert_eq!(
        t.repo.sequence_bounds(AssetKind::Script).await.unwrap(),
        Some((1, 2))
    );
    assert_eq!(
        t.revisions.reconstruct(AssetKind::Script, 2).await.unwrap(),
        "a\nb"
    );
    let err = t.revisions.get_revision(third.id).await.unwrap_err();
    assert!(err.is_kind(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_delete_oldest_promotes_its_successor() {
    let t = TestServices::new();
    let first = t.save(AssetKind::Script, "a").await;
    let second = t.save(AssetKind::Script, "a\nb").await;
    t.save(AssetKind::Script, "a\nb\nc").await;

    t.revisions.delete_revision(first.id).await.unwrap();

    // The successor is now the chain base and carries full content.
    let promoted = t.repo.find_by_id(second.id).await.unwrap().unwrap();
    assert!(!promoted.is_diff);
    assert_eq!(promoted.payload, "a\nb");

    assert_eq!(
        t.repo.sequence_bounds(AssetKind::Script).await.unwrap(),
        Some((2, 3))
    );
    assert_eq!(
        t.revisions.reconstruct(AssetKind::Script, 3).await.unwrap(),
        "a\nb\nc"
    );
}

#[tokio::test]
async fn test_delete_middle_is_rejected() {
    let t = TestServices::new();
    t.save(AssetKind::Script, "a").await;
    let second = t.save(AssetKind::Script, "a\nb").await;
    t.save(AssetKind::Script, "a\nb\nc").await;

    let err = t.revisions.delete_revision(second.id).await.unwrap_err();
    assert!(err.is_kind(ErrorKind::Validation));
    assert_eq!(t.repo.count(AssetKind::Script).await.unwrap(), 3);
}

#[tokio::test]
async fn test_delete_sole_revision_then_chain_restarts() {
    let t = TestServices::new();
    let only = t.save(AssetKind::Script, "a").await;

    t.revisions.delete_revision(only.id).await.unwrap();
    assert_eq!(t.repo.count(AssetKind::Script).await.unwrap(), 0);

    let fresh = t.save(AssetKind::Script, "b").await;
    assert_eq!(fresh.sequence_number, 1);
    assert!(!fresh.is_diff);
}

#[tokio::test]
async fn test_stats_cover_every_file_with_revisions() {
    let t = TestServices::new();
    t.save(AssetKind::Script, "a").await;
    t.save(AssetKind::Script, "a\nb").await;
    t.save(AssetKind::Stylesheet, "x").await;

    let stats: Vec<FileStats> = t.revisions.stats().await.unwrap();
    assert_eq!(stats.len(), 2);

    let script = stats
        .iter()
        .find(|s| s.file_key == AssetKind::Script)
        .unwrap();
    assert_eq!(script.revision_count, 2);
    assert!(script.total_payload_bytes > 0);
}

/// Wraps the real repository and, for each staged payload, steals the
/// next insert's sequence position with a competing revision before
/// reporting a conflict, as if another writer had landed first.
#[derive(Debug)]
struct ContendedRepo {
    inner: Arc<dyn RevisionRepository>,
    competitors: Mutex<VecDeque<String>>,
}

impl ContendedRepo {
    fn new(inner: Arc<dyn RevisionRepository>) -> Self {
        Self {
            inner,
            competitors: Mutex::new(VecDeque::new()),
        }
    }

    fn stage_competitor(&self, diff_payload: String) {
        self.competitors.lock().unwrap().push_back(diff_payload);
    }
}

#[async_trait]
impl RevisionRepository for ContendedRepo {
    async fn insert(&self, data: &NewRevision) -> AppResult<Revision> {
        let staged = self.competitors.lock().unwrap().pop_front();
        if let Some(payload) = staged {
            self.inner
                .insert(&NewRevision {
                    file_key: data.file_key,
                    sequence_number: data.sequence_number,
                    payload,
                    is_diff: true,
                    comment: None,
                    created_by: "rival".to_string(),
                })
                .await?;
            return Err(revhub_core::AppError::conflict(format!(
                "Sequence {} already taken for {}",
                data.sequence_number, data.file_key
            )));
        }
        self.inner.insert(data).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Revision>> {
        self.inner.find_by_id(id).await
    }

    async fn find_head(&self, file_key: AssetKind) -> AppResult<Option<Revision>> {
        self.inner.find_head(file_key).await
    }

    async fn find_chain(
        &self,
        file_key: AssetKind,
        up_to_sequence: i32,
    ) -> AppResult<Vec<Revision>> {
        self.inner.find_chain(file_key, up_to_sequence).await
    }

    async fn list(
        &self,
        file_key: AssetKind,
        limit: Option<i64>,
    ) -> AppResult<Vec<RevisionSummary>> {
        self.inner.list(file_key, limit).await
    }

    async fn count(&self, file_key: AssetKind) -> AppResult<i64> {
        self.inner.count(file_key).await
    }

    async fn sequence_bounds(&self, file_key: AssetKind) -> AppResult<Option<(i32, i32)>> {
        self.inner.sequence_bounds(file_key).await
    }

    async fn find_first_since(
        &self,
        file_key: AssetKind,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Option<Revision>> {
        self.inner.find_first_since(file_key, cutoff).await
    }

    async fn promote_to_snapshot(&self, id: Uuid, payload: &str) -> AppResult<()> {
        self.inner.promote_to_snapshot(id, payload).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        self.inner.delete(id).await
    }

    async fn delete_below(&self, file_key: AssetKind, sequence: i32) -> AppResult<u64> {
        self.inner.delete_below(file_key, sequence).await
    }

    async fn stats(&self) -> AppResult<Vec<FileStats>> {
        self.inner.stats().await
    }
}

fn contended_stack() -> (Arc<ContendedRepo>, RevisionService) {
    let inner = RepositoryProvider::in_memory().revisions();
    let repo = Arc::new(ContendedRepo::new(inner));
    let retention = Arc::new(RetentionService::new(
        repo.clone(),
        RetentionConfig::default(),
    ));
    let revisions = RevisionService::new(repo.clone(), retention);
    (repo, revisions)
}

fn diff_payload(base: &str, derived: &str) -> String {
    serde_json::to_string(&compute_diff(base, derived)).unwrap()
}

#[tokio::test]
async fn test_sequence_conflict_retries_against_the_new_head() {
    let (repo, revisions) = contended_stack();
    revisions
        .create_revision(&ctx(), AssetKind::Script, "a", None)
        .await
        .unwrap();

    // A rival claims sequence 2 just before our save lands.
    repo.stage_competitor(diff_payload("a", "a\nstolen"));

    let created = revisions
        .create_revision(&ctx(), AssetKind::Script, "a\nmine", None)
        .await
        .unwrap();

    assert_eq!(created.sequence_number, 3);
    assert_eq!(
        revisions.reconstruct(AssetKind::Script, 3).await.unwrap(),
        "a\nmine"
    );
    assert_eq!(
        revisions.reconstruct(AssetKind::Script, 2).await.unwrap(),
        "a\nstolen"
    );
}

#[tokio::test]
async fn test_sequence_conflict_is_retried_only_once() {
    let (repo, revisions) = contended_stack();
    revisions
        .create_revision(&ctx(), AssetKind::Script, "a", None)
        .await
        .unwrap();

    // Rivals win both the first attempt and the retry.
    repo.stage_competitor(diff_payload("a", "a\nstolen"));
    repo.stage_competitor(diff_payload("a\nstolen", "a\nstolen\nmore"));

    let err = revisions
        .create_revision(&ctx(), AssetKind::Script, "a\nmine", None)
        .await
        .unwrap_err();

    assert!(err.is_kind(ErrorKind::Conflict));
    assert_eq!(repo.count(AssetKind::Script).await.unwrap(), 3);
}
