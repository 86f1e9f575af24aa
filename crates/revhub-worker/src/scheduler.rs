//! Cron scheduler for the periodic retention sweep.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::info;

use revhub_core::config::worker::WorkerConfig;
use revhub_core::error::AppError;
use revhub_core::result::AppResult;
use revhub_service::RetentionService;

/// Cron-based scheduler for periodic maintenance tasks.
pub struct CronScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
    /// Retention service driven by the sweep task.
    retention: Arc<RetentionService>,
    /// Worker settings, including the sweep schedule.
    config: WorkerConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler.
    pub async fn new(retention: Arc<RetentionService>, config: WorkerConfig) -> AppResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            retention,
            config,
        })
    }

    /// Register all scheduled tasks.
    pub async fn register_default_tasks(&self) -> AppResult<()> {
        self.register_retention_sweep().await?;
        info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> AppResult<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler.
    pub async fn shutdown(&mut self) -> AppResult<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        info!("Cron scheduler shut down");
        Ok(())
    }

    /// Retention sweep at the configured cron schedule.
    async fn register_retention_sweep(&self) -> AppResult<()> {
        let retention = Arc::clone(&self.retention);
        let job = CronJob::new_async(self.config.sweep_schedule.as_str(), move |_uuid, _lock| {
            let retention = Arc::clone(&retention);
            Box::pin(async move {
                info!("Running scheduled retention sweep");
                let deleted = retention.sweep_expired().await;
                info!(deleted, "Retention sweep finished");
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create retention_sweep schedule: {e}"))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add retention_sweep schedule: {e}")))?;

        info!(schedule = %self.config.sweep_schedule, "Registered: retention_sweep");
        Ok(())
    }
}
