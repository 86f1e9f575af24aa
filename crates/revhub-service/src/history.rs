//! Restore history — recording and browsing the restore log.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use revhub_core::error::AppError;
use revhub_core::result::AppResult;
use revhub_core::types::{AssetKind, PageRequest, PageResponse};
use revhub_database::{RestoreLogRepository, RevisionRepository};
use revhub_entity::restore::{NewRestoreLogEntry, RestoreKind, RestoreLogEntry, RestoreRecord};

/// Maintains the append-only restore log.
#[derive(Debug, Clone)]
pub struct HistoryService {
    restore_log: Arc<dyn RestoreLogRepository>,
    revisions: Arc<dyn RevisionRepository>,
}

impl HistoryService {
    /// Create a new history service.
    pub fn new(
        restore_log: Arc<dyn RestoreLogRepository>,
        revisions: Arc<dyn RevisionRepository>,
    ) -> Self {
        Self {
            restore_log,
            revisions,
        }
    }

    /// Record a restore of `restored_revision_id` over the state captured
    /// in `previous_revision_id`.
    ///
    /// Both referenced revisions must exist at recording time and belong
    /// to `file_key`. Entries are never updated or deleted afterwards,
    /// even when retention later prunes the revisions they point at.
    pub async fn record_restore(
        &self,
        file_key: AssetKind,
        restored_revision_id: Uuid,
        previous_revision_id: Option<Uuid>,
        actor: &str,
        kind: RestoreKind,
        notes: Option<&str>,
    ) -> AppResult<RestoreLogEntry> {
        self.check_reference(file_key, restored_revision_id, "restored")
            .await?;
        if let Some(previous_id) = previous_revision_id {
            self.check_reference(file_key, previous_id, "previous")
                .await?;
        }

        let entry = self
            .restore_log
            .insert(&NewRestoreLogEntry {
                file_key,
                restored_revision_id,
                previous_revision_id,
                actor: actor.to_string(),
                kind,
                notes: notes.map(String::from),
            })
            .await?;

        info!(
            file_key = %file_key,
            entry_id = %entry.id,
            restored_revision_id = %restored_revision_id,
            kind = %kind,
            actor = %actor,
            "Restore recorded"
        );
        Ok(entry)
    }

    /// List restore-log entries, newest first, joined with the sequence
    /// numbers of the revisions they reference where those still exist.
    pub async fn list_history(
        &self,
        file_key: Option<AssetKind>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<RestoreRecord>> {
        self.restore_log.list(file_key, page).await
    }

    /// Verify that `revision_id` names an existing revision of `file_key`.
    async fn check_reference(
        &self,
        file_key: AssetKind,
        revision_id: Uuid,
        role: &str,
    ) -> AppResult<()> {
        match self.revisions.find_by_id(revision_id).await? {
            Some(revision) if revision.file_key == file_key => Ok(()),
            Some(revision) => Err(AppError::invalid_reference(format!(
                "The {role} revision {revision_id} belongs to {}, not {file_key}",
                revision.file_key
            ))),
            None => Err(AppError::invalid_reference(format!(
                "The {role} revision {revision_id} does not exist"
            ))),
        }
    }
}
