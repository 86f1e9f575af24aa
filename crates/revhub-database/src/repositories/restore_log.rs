//! PostgreSQL restore log repository.

use async_trait::async_trait;
use sqlx::PgPool;

use revhub_core::error::{AppError, ErrorKind};
use revhub_core::result::AppResult;
use revhub_core::types::{AssetKind, PageRequest, PageResponse};
use revhub_entity::restore::{NewRestoreLogEntry, RestoreLogEntry, RestoreRecord};

use super::RestoreLogRepository;

/// PostgreSQL-backed restore log repository.
#[derive(Debug, Clone)]
pub struct PostgresRestoreLogRepository {
    pool: PgPool,
}

impl PostgresRestoreLogRepository {
    /// Create a new restore log repository on the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RestoreLogRepository for PostgresRestoreLogRepository {
    async fn insert(&self, data: &NewRestoreLogEntry) -> AppResult<RestoreLogEntry> {
        sqlx::query_as::<_, RestoreLogEntry>(
            "INSERT INTO restore_log \
             (file_key, restored_revision_id, previous_revision_id, actor, kind, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.file_key)
        .bind(data.restored_revision_id)
        .bind(data.previous_revision_id)
        .bind(&data.actor)
        .bind(data.kind)
        .bind(data.notes.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to append restore log entry", e)
        })
    }

    async fn list(
        &self,
        file_key: Option<AssetKind>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<RestoreRecord>> {
        let mut param_idx = 1u32;
        let where_clause = if file_key.is_some() {
            let clause = format!("WHERE e.file_key = ${param_idx}");
            param_idx += 1;
            clause
        } else {
            String::new()
        };

        let count_sql = format!("SELECT COUNT(*) FROM restore_log e {where_clause}");
        // The joins are display-only: entries whose revisions have been
        // pruned still list, with NULL sequence columns.
        let select_sql = format!(
            "SELECT e.id, e.file_key, e.restored_revision_id, e.previous_revision_id, \
                    e.actor, e.kind, e.notes, e.performed_at, \
                    r.sequence_number AS restored_sequence, \
                    r.comment AS restored_comment, \
                    p.sequence_number AS previous_sequence \
             FROM restore_log e \
             LEFT JOIN revisions r ON r.id = e.restored_revision_id \
             LEFT JOIN revisions p ON p.id = e.previous_revision_id \
             {where_clause} \
             ORDER BY e.performed_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, RestoreRecord>(&select_sql);

        if let Some(key) = file_key {
            count_query = count_query.bind(key);
            select_query = select_query.bind(key);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count restore log entries", e)
        })?;

        let records = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list restore history", e)
            })?;

        Ok(PageResponse::new(
            records,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
