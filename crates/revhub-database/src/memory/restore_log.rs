//! In-memory restore log repository using a Tokio mutex.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use revhub_core::result::AppResult;
use revhub_core::types::{AssetKind, PageRequest, PageResponse};
use revhub_entity::restore::{NewRestoreLogEntry, RestoreLogEntry, RestoreRecord};

use crate::memory::MemoryRevisionRepository;
use crate::repositories::{RestoreLogRepository, RevisionRepository};

/// In-memory restore log repository using a Tokio mutex for thread
/// safety.
///
/// Holds a handle to the revision repository it was built with so the
/// history projection can join in sequence numbers and comments, the
/// way the PostgreSQL implementation joins tables.
#[derive(Debug, Clone)]
pub struct MemoryRestoreLogRepository {
    /// Protected entry list, in insertion order.
    state: Arc<Mutex<Vec<RestoreLogEntry>>>,
    /// Revision lookup for the display projection.
    revisions: MemoryRevisionRepository,
}

impl MemoryRestoreLogRepository {
    /// Create an empty log over the given revision repository.
    pub fn new(revisions: MemoryRevisionRepository) -> Self {
        Self {
            state: Arc::new(Mutex::new(Vec::new())),
            revisions,
        }
    }
}

#[async_trait]
impl RestoreLogRepository for MemoryRestoreLogRepository {
    async fn insert(&self, data: &NewRestoreLogEntry) -> AppResult<RestoreLogEntry> {
        let entry = RestoreLogEntry {
            id: Uuid::new_v4(),
            file_key: data.file_key,
            restored_revision_id: data.restored_revision_id,
            previous_revision_id: data.previous_revision_id,
            actor: data.actor.clone(),
            kind: data.kind,
            notes: data.notes.clone(),
            performed_at: Utc::now(),
        };
        self.state.lock().await.push(entry.clone());
        Ok(entry)
    }

    async fn list(
        &self,
        file_key: Option<AssetKind>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<RestoreRecord>> {
        // Reverse insertion order so equal timestamps still list newest
        // first after the stable sort.
        let mut entries: Vec<RestoreLogEntry> = {
            let state = self.state.lock().await;
            state
                .iter()
                .rev()
                .filter(|e| file_key.is_none_or(|key| e.file_key == key))
                .cloned()
                .collect()
        };
        entries.sort_by(|a, b| b.performed_at.cmp(&a.performed_at));

        let total = entries.len() as u64;
        let window = entries
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize);

        let mut records = Vec::new();
        for entry in window {
            let restored = self.revisions.find_by_id(entry.restored_revision_id).await?;
            let previous = match entry.previous_revision_id {
                Some(id) => self.revisions.find_by_id(id).await?,
                None => None,
            };
            records.push(RestoreRecord {
                id: entry.id,
                file_key: entry.file_key,
                restored_revision_id: entry.restored_revision_id,
                previous_revision_id: entry.previous_revision_id,
                actor: entry.actor,
                kind: entry.kind,
                notes: entry.notes,
                performed_at: entry.performed_at,
                restored_sequence: restored.as_ref().map(|r| r.sequence_number),
                restored_comment: restored.and_then(|r| r.comment),
                previous_sequence: previous.map(|r| r.sequence_number),
            });
        }

        Ok(PageResponse::new(
            records,
            page.page,
            page.page_size,
            total,
        ))
    }
}
