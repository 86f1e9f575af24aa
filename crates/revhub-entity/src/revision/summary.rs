//! Payload-free projections of the revision table.

use chrono::{DateTime, Utc};
use revhub_core::types::AssetKind;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata view of a revision, without its payload.
///
/// Listing endpoints return this instead of [`Revision`] so that
/// browsing a long history never loads every payload.
///
/// [`Revision`]: crate::revision::Revision
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RevisionSummary {
    /// Unique revision identifier.
    pub id: Uuid,
    /// The asset file this revision belongs to.
    pub file_key: AssetKind,
    /// Position in the file's revision chain.
    pub sequence_number: i32,
    /// Whether the stored payload is an edit script.
    pub is_diff: bool,
    /// Optional comment describing the change.
    pub comment: Option<String>,
    /// Who saved this revision.
    pub created_by: String,
    /// When this revision was created.
    pub created_at: DateTime<Utc>,
    /// Stored payload size in bytes.
    pub payload_bytes: i64,
}

/// Aggregate revision statistics for one asset file.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileStats {
    /// The asset file.
    pub file_key: AssetKind,
    /// Number of stored revisions.
    pub revision_count: i64,
    /// Combined payload size in bytes.
    pub total_payload_bytes: i64,
    /// Creation time of the oldest surviving revision.
    pub oldest_at: Option<DateTime<Utc>>,
    /// Creation time of the newest revision.
    pub newest_at: Option<DateTime<Utc>>,
}
