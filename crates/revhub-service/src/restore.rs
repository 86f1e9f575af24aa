//! Restore orchestration — rolling the live asset back to a stored
//! revision.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use revhub_core::result::AppResult;
use revhub_core::traits::AssetStore;
use revhub_entity::restore::{RestoreKind, RestoreLogEntry};

use crate::context::RequestContext;
use crate::history::HistoryService;
use crate::revision::RevisionService;

/// Comment attached to the safety backup taken before each restore.
pub const BACKUP_COMMENT: &str = "Automatic backup before restore";

/// The result of a completed restore.
#[derive(Debug, Clone, Serialize)]
pub struct RestoreOutcome {
    /// The content now live on disk.
    pub content: String,
    /// The safety backup taken before overwriting, when one was needed.
    pub backup_revision_id: Option<Uuid>,
    /// The restore-log entry recorded for the operation.
    pub log_entry: RestoreLogEntry,
}

/// Rolls the live asset back to a stored revision.
#[derive(Debug, Clone)]
pub struct RestoreService {
    revisions: Arc<RevisionService>,
    history: Arc<HistoryService>,
    assets: Arc<dyn AssetStore>,
}

impl RestoreService {
    /// Create a new restore service.
    pub fn new(
        revisions: Arc<RevisionService>,
        history: Arc<HistoryService>,
        assets: Arc<dyn AssetStore>,
    ) -> Self {
        Self {
            revisions,
            history,
            assets,
        }
    }

    /// Restore the live asset to the content of `revision_id`.
    ///
    /// The current live content is captured as a backup revision before
    /// anything is overwritten, so the restore itself can be undone. The
    /// steps run in durability order: the backup is committed before the
    /// live file changes, and the live file changes before the restore is
    /// logged. A failure at any step leaves at worst an extra revision,
    /// never lost content.
    pub async fn restore(
        &self,
        ctx: &RequestContext,
        revision_id: Uuid,
        notes: Option<&str>,
    ) -> AppResult<RestoreOutcome> {
        let target = self.revisions.get_revision(revision_id).await?;
        let file_key = target.file_key;

        // A missing or empty live file has nothing worth backing up.
        let backup = match self.assets.read(file_key).await? {
            Some(content) if !content.is_empty() => Some(
                self.revisions
                    .create_revision(ctx, file_key, &content, Some(BACKUP_COMMENT))
                    .await?,
            ),
            _ => None,
        };
        let backup_revision_id = backup.map(|revision| revision.id);

        let content = self.revisions.get_revision_content(revision_id).await?;
        self.assets.write(file_key, &content).await?;

        let log_entry = self
            .history
            .record_restore(
                file_key,
                revision_id,
                backup_revision_id,
                &ctx.actor,
                RestoreKind::Manual,
                notes,
            )
            .await?;

        info!(
            request_id = %ctx.request_id,
            file_key = %file_key,
            revision_id = %revision_id,
            backup_revision_id = ?backup_revision_id,
            actor = %ctx.actor,
            "Live asset restored"
        );

        Ok(RestoreOutcome {
            content,
            backup_revision_id,
            log_entry,
        })
    }
}
