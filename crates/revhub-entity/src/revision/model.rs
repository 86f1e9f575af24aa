//! Revision entity model.

use chrono::{DateTime, Utc};
use revhub_core::types::AssetKind;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One stored revision of a managed asset file.
///
/// The first revision of a file is always a full snapshot. Later
/// revisions normally store a serialized edit script against the
/// content of the preceding revision; `is_diff` tells the two apart.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Revision {
    /// Unique revision identifier.
    pub id: Uuid,
    /// The asset file this revision belongs to.
    pub file_key: AssetKind,
    /// Position in the file's revision chain (1-based, gapless).
    pub sequence_number: i32,
    /// Full content (snapshot) or serialized edit script (diff).
    pub payload: String,
    /// Whether `payload` is an edit script rather than a snapshot.
    pub is_diff: bool,
    /// Optional comment describing the change.
    pub comment: Option<String>,
    /// Who saved this revision.
    pub created_by: String,
    /// When this revision was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to store a new revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRevision {
    /// The asset file the revision belongs to.
    pub file_key: AssetKind,
    /// Position in the file's revision chain.
    pub sequence_number: i32,
    /// Full content or serialized edit script.
    pub payload: String,
    /// Whether `payload` is an edit script.
    pub is_diff: bool,
    /// Optional comment describing the change.
    pub comment: Option<String>,
    /// Who is saving the revision.
    pub created_by: String,
}
