//! Repository contracts and their PostgreSQL implementations.

pub mod restore_log;
pub mod revision;

pub use restore_log::PostgresRestoreLogRepository;
pub use revision::PostgresRevisionRepository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use revhub_core::result::AppResult;
use revhub_core::types::{AssetKind, PageRequest, PageResponse};
use revhub_entity::restore::{NewRestoreLogEntry, RestoreLogEntry, RestoreRecord};
use revhub_entity::revision::{FileStats, NewRevision, Revision, RevisionSummary};

/// Persistence contract for the revision chains.
///
/// Implementations must guarantee atomic, collision-free sequence
/// assignment: `insert` fails with a `Conflict` error when the
/// `(file_key, sequence_number)` pair is already taken, so that two
/// concurrent saves can never both claim the same chain position. Two
/// implementations are provided:
/// - PostgreSQL (unique constraint on the pair)
/// - In-memory (using `tokio::sync::Mutex`)
#[async_trait]
pub trait RevisionRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a revision at the sequence position named in `data`.
    ///
    /// Fails with a `Conflict` error when that position is already
    /// taken for the file; the caller is expected to re-read the head
    /// and retry once.
    async fn insert(&self, data: &NewRevision) -> AppResult<Revision>;

    /// Find a revision by its id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Revision>>;

    /// Find the highest-sequence revision of a file.
    async fn find_head(&self, file_key: AssetKind) -> AppResult<Option<Revision>>;

    /// Load all revisions of a file with `sequence_number <= up_to_sequence`,
    /// ordered ascending.
    async fn find_chain(&self, file_key: AssetKind, up_to_sequence: i32)
    -> AppResult<Vec<Revision>>;

    /// List revision metadata for a file, newest first.
    ///
    /// `limit` bounds the result when given. Payloads are never loaded.
    async fn list(&self, file_key: AssetKind, limit: Option<i64>)
    -> AppResult<Vec<RevisionSummary>>;

    /// Count the stored revisions of a file.
    async fn count(&self, file_key: AssetKind) -> AppResult<i64>;

    /// Return the lowest and highest sequence number of a file, or
    /// `None` when it has no revisions.
    async fn sequence_bounds(&self, file_key: AssetKind) -> AppResult<Option<(i32, i32)>>;

    /// Find the lowest-sequence revision of a file created at or after
    /// the given instant.
    async fn find_first_since(
        &self,
        file_key: AssetKind,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Option<Revision>>;

    /// Replace a revision's payload with a full snapshot and clear its
    /// diff flag. All other fields, including `created_at`, are kept.
    async fn promote_to_snapshot(&self, id: Uuid, payload: &str) -> AppResult<()>;

    /// Delete a revision. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Delete every revision of a file with a sequence number strictly
    /// below `sequence`. Returns the number of rows removed.
    async fn delete_below(&self, file_key: AssetKind, sequence: i32) -> AppResult<u64>;

    /// Aggregate per-file revision statistics. Files without revisions
    /// are omitted.
    async fn stats(&self) -> AppResult<Vec<FileStats>>;
}

/// Persistence contract for the append-only restore log.
///
/// The log carries no update or delete operation. Entries reference
/// revisions by id without a foreign key, so they survive revision
/// pruning; the display projection returns `None` for references that
/// no longer resolve.
#[async_trait]
pub trait RestoreLogRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Append an entry. `id` and `performed_at` are assigned by the
    /// store.
    async fn insert(&self, data: &NewRestoreLogEntry) -> AppResult<RestoreLogEntry>;

    /// List entries newest first, optionally scoped to one file,
    /// joined with the sequence number and comment of the revisions
    /// they reference.
    async fn list(
        &self,
        file_key: Option<AssetKind>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<RestoreRecord>>;
}
