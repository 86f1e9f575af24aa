//! Restore log entity models.

use chrono::{DateTime, Utc};
use revhub_core::types::AssetKind;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::restore::RestoreKind;

/// An immutable log entry recording one restore operation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RestoreLogEntry {
    /// Unique log entry identifier.
    pub id: Uuid,
    /// The asset file that was restored.
    pub file_key: AssetKind,
    /// The revision whose content was written back to the live file.
    pub restored_revision_id: Uuid,
    /// Safety backup of the pre-restore content, if one was taken.
    pub previous_revision_id: Option<Uuid>,
    /// Who performed the restore.
    pub actor: String,
    /// How the restore was initiated.
    pub kind: RestoreKind,
    /// Optional free-form note.
    pub notes: Option<String>,
    /// When the restore happened.
    pub performed_at: DateTime<Utc>,
}

/// Data required to append a restore log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRestoreLogEntry {
    /// The asset file that was restored.
    pub file_key: AssetKind,
    /// The revision whose content was written back.
    pub restored_revision_id: Uuid,
    /// Safety backup revision, if one was taken.
    pub previous_revision_id: Option<Uuid>,
    /// Who performed the restore.
    pub actor: String,
    /// How the restore was initiated.
    pub kind: RestoreKind,
    /// Optional free-form note.
    pub notes: Option<String>,
}

/// A restore log entry joined with revision-chain context for display.
///
/// The sequence and comment columns come from the revision table and
/// are `None` when the referenced revision has since been pruned.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RestoreRecord {
    /// Unique log entry identifier.
    pub id: Uuid,
    /// The asset file that was restored.
    pub file_key: AssetKind,
    /// The revision whose content was written back.
    pub restored_revision_id: Uuid,
    /// Safety backup revision, if one was taken.
    pub previous_revision_id: Option<Uuid>,
    /// Who performed the restore.
    pub actor: String,
    /// How the restore was initiated.
    pub kind: RestoreKind,
    /// Optional free-form note.
    pub notes: Option<String>,
    /// When the restore happened.
    pub performed_at: DateTime<Utc>,
    /// Sequence number of the restored revision.
    pub restored_sequence: Option<i32>,
    /// Comment on the restored revision.
    pub restored_comment: Option<String>,
    /// Sequence number of the safety backup revision.
    pub previous_sequence: Option<i32>,
}
