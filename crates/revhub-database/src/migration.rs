//! Schema migration runner.

use sqlx::PgPool;
use tracing::info;

use revhub_core::error::{AppError, ErrorKind};
use revhub_core::result::AppResult;

/// Apply all pending schema migrations.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!("Applying schema migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to apply migrations: {e}"),
                e,
            )
        })?;

    info!("Schema is up to date");
    Ok(())
}
