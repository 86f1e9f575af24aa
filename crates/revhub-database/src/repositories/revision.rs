//! PostgreSQL revision repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use revhub_core::error::{AppError, ErrorKind};
use revhub_core::result::AppResult;
use revhub_core::types::AssetKind;
use revhub_entity::revision::{FileStats, NewRevision, Revision, RevisionSummary};

use super::RevisionRepository;

/// PostgreSQL-backed revision repository.
///
/// Sequence collisions are surfaced by the unique constraint on
/// `(file_key, sequence_number)` and mapped to a `Conflict` error.
#[derive(Debug, Clone)]
pub struct PostgresRevisionRepository {
    pool: PgPool,
}

impl PostgresRevisionRepository {
    /// Create a new revision repository on the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevisionRepository for PostgresRevisionRepository {
    async fn insert(&self, data: &NewRevision) -> AppResult<Revision> {
        sqlx::query_as::<_, Revision>(
            "INSERT INTO revisions (file_key, sequence_number, payload, is_diff, comment, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.file_key)
        .bind(data.sequence_number)
        .bind(&data.payload)
        .bind(data.is_diff)
        .bind(data.comment.as_deref())
        .bind(&data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                AppError::conflict(format!(
                    "Sequence {} already taken for {}",
                    data.sequence_number, data.file_key
                ))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to insert revision", e)
            }
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Revision>> {
        sqlx::query_as::<_, Revision>("SELECT * FROM revisions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find revision", e))
    }

    async fn find_head(&self, file_key: AssetKind) -> AppResult<Option<Revision>> {
        sqlx::query_as::<_, Revision>(
            "SELECT * FROM revisions WHERE file_key = $1 ORDER BY sequence_number DESC LIMIT 1",
        )
        .bind(file_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find head revision", e))
    }

    async fn find_chain(
        &self,
        file_key: AssetKind,
        up_to_sequence: i32,
    ) -> AppResult<Vec<Revision>> {
        sqlx::query_as::<_, Revision>(
            "SELECT * FROM revisions WHERE file_key = $1 AND sequence_number <= $2 \
             ORDER BY sequence_number ASC",
        )
        .bind(file_key)
        .bind(up_to_sequence)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load revision chain", e))
    }

    async fn list(
        &self,
        file_key: AssetKind,
        limit: Option<i64>,
    ) -> AppResult<Vec<RevisionSummary>> {
        // LIMIT NULL means no limit in PostgreSQL.
        sqlx::query_as::<_, RevisionSummary>(
            "SELECT id, file_key, sequence_number, is_diff, comment, created_by, created_at, \
                    OCTET_LENGTH(payload)::BIGINT AS payload_bytes \
             FROM revisions WHERE file_key = $1 ORDER BY sequence_number DESC LIMIT $2",
        )
        .bind(file_key)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list revisions", e))
    }

    async fn count(&self, file_key: AssetKind) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM revisions WHERE file_key = $1")
            .bind(file_key)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count revisions", e))
    }

    async fn sequence_bounds(&self, file_key: AssetKind) -> AppResult<Option<(i32, i32)>> {
        let (min, max) = sqlx::query_as::<_, (Option<i32>, Option<i32>)>(
            "SELECT MIN(sequence_number), MAX(sequence_number) FROM revisions WHERE file_key = $1",
        )
        .bind(file_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read sequence bounds", e)
        })?;

        Ok(min.zip(max))
    }

    async fn find_first_since(
        &self,
        file_key: AssetKind,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Option<Revision>> {
        sqlx::query_as::<_, Revision>(
            "SELECT * FROM revisions WHERE file_key = $1 AND created_at >= $2 \
             ORDER BY sequence_number ASC LIMIT 1",
        )
        .bind(file_key)
        .bind(cutoff)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find surviving revision", e)
        })
    }

    async fn promote_to_snapshot(&self, id: Uuid, payload: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE revisions SET payload = $2, is_diff = FALSE WHERE id = $1")
            .bind(id)
            .bind(payload)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to promote revision", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Revision {id} not found")));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM revisions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete revision", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_below(&self, file_key: AssetKind, sequence: i32) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM revisions WHERE file_key = $1 AND sequence_number < $2")
                .bind(file_key)
                .bind(sequence)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete old revisions", e)
                })?;
        Ok(result.rows_affected())
    }

    async fn stats(&self) -> AppResult<Vec<FileStats>> {
        sqlx::query_as::<_, FileStats>(
            "SELECT file_key, \
                    COUNT(*) AS revision_count, \
                    SUM(OCTET_LENGTH(payload))::BIGINT AS total_payload_bytes, \
                    MIN(created_at) AS oldest_at, \
                    MAX(created_at) AS newest_at \
             FROM revisions GROUP BY file_key ORDER BY file_key",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to aggregate revision stats", e)
        })
    }
}
