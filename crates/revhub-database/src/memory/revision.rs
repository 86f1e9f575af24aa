//! In-memory revision repository using a Tokio mutex.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use revhub_core::error::AppError;
use revhub_core::result::AppResult;
use revhub_core::types::AssetKind;
use revhub_entity::revision::{FileStats, NewRevision, Revision, RevisionSummary};

use crate::repositories::RevisionRepository;

/// Internal state for the memory-backed revision repository.
#[derive(Debug, Default)]
struct InnerStore {
    /// All stored revisions, in insertion order.
    rows: Vec<Revision>,
}

/// In-memory revision repository using a Tokio mutex for thread safety.
///
/// Enforces the same `(file_key, sequence_number)` uniqueness the
/// PostgreSQL schema enforces with a constraint.
#[derive(Debug, Clone, Default)]
pub struct MemoryRevisionRepository {
    /// Protected inner state.
    state: Arc<Mutex<InnerStore>>,
}

impl MemoryRevisionRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn summarize(revision: &Revision) -> RevisionSummary {
    RevisionSummary {
        id: revision.id,
        file_key: revision.file_key,
        sequence_number: revision.sequence_number,
        is_diff: revision.is_diff,
        comment: revision.comment.clone(),
        created_by: revision.created_by.clone(),
        created_at: revision.created_at,
        payload_bytes: revision.payload.len() as i64,
    }
}

#[async_trait]
impl RevisionRepository for MemoryRevisionRepository {
    async fn insert(&self, data: &NewRevision) -> AppResult<Revision> {
        let mut state = self.state.lock().await;

        let taken = state
            .rows
            .iter()
            .any(|r| r.file_key == data.file_key && r.sequence_number == data.sequence_number);
        if taken {
            return Err(AppError::conflict(format!(
                "Sequence {} already taken for {}",
                data.sequence_number, data.file_key
            )));
        }

        let revision = Revision {
            id: Uuid::new_v4(),
            file_key: data.file_key,
            sequence_number: data.sequence_number,
            payload: data.payload.clone(),
            is_diff: data.is_diff,
            comment: data.comment.clone(),
            created_by: data.created_by.clone(),
            created_at: Utc::now(),
        };
        state.rows.push(revision.clone());
        Ok(revision)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Revision>> {
        let state = self.state.lock().await;
        Ok(state.rows.iter().find(|r| r.id == id).cloned())
    }

    async fn find_head(&self, file_key: AssetKind) -> AppResult<Option<Revision>> {
        let state = self.state.lock().await;
        Ok(state
            .rows
            .iter()
            .filter(|r| r.file_key == file_key)
            .max_by_key(|r| r.sequence_number)
            .cloned())
    }

    async fn find_chain(
        &self,
        file_key: AssetKind,
        up_to_sequence: i32,
    ) -> AppResult<Vec<Revision>> {
        let state = self.state.lock().await;
        let mut chain: Vec<Revision> = state
            .rows
            .iter()
            .filter(|r| r.file_key == file_key && r.sequence_number <= up_to_sequence)
            .cloned()
            .collect();
        chain.sort_by_key(|r| r.sequence_number);
        Ok(chain)
    }

    async fn list(
        &self,
        file_key: AssetKind,
        limit: Option<i64>,
    ) -> AppResult<Vec<RevisionSummary>> {
        let state = self.state.lock().await;
        let mut rows: Vec<&Revision> = state
            .rows
            .iter()
            .filter(|r| r.file_key == file_key)
            .collect();
        rows.sort_by_key(|r| std::cmp::Reverse(r.sequence_number));
        if let Some(limit) = limit {
            rows.truncate(limit.max(0) as usize);
        }
        Ok(rows.into_iter().map(summarize).collect())
    }

    async fn count(&self, file_key: AssetKind) -> AppResult<i64> {
        let state = self.state.lock().await;
        Ok(state.rows.iter().filter(|r| r.file_key == file_key).count() as i64)
    }

    async fn sequence_bounds(&self, file_key: AssetKind) -> AppResult<Option<(i32, i32)>> {
        let state = self.state.lock().await;
        let mut bounds: Option<(i32, i32)> = None;
        for row in state.rows.iter().filter(|r| r.file_key == file_key) {
            bounds = Some(match bounds {
                None => (row.sequence_number, row.sequence_number),
                Some((min, max)) => (min.min(row.sequence_number), max.max(row.sequence_number)),
            });
        }
        Ok(bounds)
    }

    async fn find_first_since(
        &self,
        file_key: AssetKind,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Option<Revision>> {
        let state = self.state.lock().await;
        Ok(state
            .rows
            .iter()
            .filter(|r| r.file_key == file_key && r.created_at >= cutoff)
            .min_by_key(|r| r.sequence_number)
            .cloned())
    }

    async fn promote_to_snapshot(&self, id: Uuid, payload: &str) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let row = state
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::not_found(format!("Revision {id} not found")))?;
        row.payload = payload.to_string();
        row.is_diff = false;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let before = state.rows.len();
        state.rows.retain(|r| r.id != id);
        Ok(state.rows.len() < before)
    }

    async fn delete_below(&self, file_key: AssetKind, sequence: i32) -> AppResult<u64> {
        let mut state = self.state.lock().await;
        let before = state.rows.len();
        state
            .rows
            .retain(|r| !(r.file_key == file_key && r.sequence_number < sequence));
        Ok((before - state.rows.len()) as u64)
    }

    async fn stats(&self) -> AppResult<Vec<FileStats>> {
        let state = self.state.lock().await;
        let mut stats = Vec::new();
        for kind in AssetKind::ALL {
            let rows: Vec<&Revision> = state.rows.iter().filter(|r| r.file_key == kind).collect();
            if rows.is_empty() {
                continue;
            }
            stats.push(FileStats {
                file_key: kind,
                revision_count: rows.len() as i64,
                total_payload_bytes: rows.iter().map(|r| r.payload.len() as i64).sum(),
                oldest_at: rows.iter().map(|r| r.created_at).min(),
                newest_at: rows.iter().map(|r| r.created_at).max(),
            });
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_revision(file_key: AssetKind, sequence: i32, payload: &str) -> NewRevision {
        NewRevision {
            file_key,
            sequence_number: sequence,
            payload: payload.to_string(),
            is_diff: sequence > 1,
            comment: None,
            created_by: "tester".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_taken_sequence() {
        let repo = MemoryRevisionRepository::new();
        repo.insert(&make_revision(AssetKind::Script, 1, "a"))
            .await
            .unwrap();

        let err = repo
            .insert(&make_revision(AssetKind::Script, 1, "b"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, revhub_core::error::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_same_sequence_allowed_across_files() {
        let repo = MemoryRevisionRepository::new();
        repo.insert(&make_revision(AssetKind::Script, 1, "a"))
            .await
            .unwrap();
        repo.insert(&make_revision(AssetKind::Stylesheet, 1, "b"))
            .await
            .unwrap();

        assert_eq!(repo.count(AssetKind::Script).await.unwrap(), 1);
        assert_eq!(repo.count(AssetKind::Stylesheet).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_chain_is_ascending_and_bounded() {
        let repo = MemoryRevisionRepository::new();
        for seq in 1..=4 {
            repo.insert(&make_revision(AssetKind::Script, seq, "x"))
                .await
                .unwrap();
        }

        let chain = repo.find_chain(AssetKind::Script, 3).await.unwrap();
        let sequences: Vec<i32> = chain.iter().map(|r| r.sequence_number).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_limited() {
        let repo = MemoryRevisionRepository::new();
        for seq in 1..=5 {
            repo.insert(&make_revision(AssetKind::Script, seq, "x"))
                .await
                .unwrap();
        }

        let summaries = repo.list(AssetKind::Script, Some(2)).await.unwrap();
        let sequences: Vec<i32> = summaries.iter().map(|s| s.sequence_number).collect();
        assert_eq!(sequences, vec![5, 4]);
    }

    #[tokio::test]
    async fn test_delete_below_keeps_upper_chain() {
        let repo = MemoryRevisionRepository::new();
        for seq in 1..=5 {
            repo.insert(&make_revision(AssetKind::Script, seq, "x"))
                .await
                .unwrap();
        }

        let removed = repo.delete_below(AssetKind::Script, 4).await.unwrap();
        assert_eq!(removed, 3);
        assert_eq!(
            repo.sequence_bounds(AssetKind::Script).await.unwrap(),
            Some((4, 5))
        );
    }

    #[tokio::test]
    async fn test_promote_clears_diff_flag() {
        let repo = MemoryRevisionRepository::new();
        repo.insert(&make_revision(AssetKind::Script, 1, "a"))
            .await
            .unwrap();
        let second = repo
            .insert(&make_revision(AssetKind::Script, 2, "diff-payload"))
            .await
            .unwrap();
        assert!(second.is_diff);

        repo.promote_to_snapshot(second.id, "full content")
            .await
            .unwrap();

        let reloaded = repo.find_by_id(second.id).await.unwrap().unwrap();
        assert!(!reloaded.is_diff);
        assert_eq!(reloaded.payload, "full content");
        assert_eq!(reloaded.created_at, second.created_at);
    }
}
