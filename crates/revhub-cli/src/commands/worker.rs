//! Maintenance worker CLI commands.

use clap::{Args, Subcommand};

use crate::output;
use revhub_core::config::AppConfig;
use revhub_core::error::AppError;
use revhub_worker::CronScheduler;

/// Arguments for worker commands
#[derive(Debug, Args)]
pub struct WorkerArgs {
    /// Worker subcommand
    #[command(subcommand)]
    pub command: WorkerCommand,
}

/// Worker subcommands
#[derive(Debug, Subcommand)]
pub enum WorkerCommand {
    /// Run the scheduler in the foreground until interrupted
    Run,
    /// Trigger the retention sweep once and exit
    Sweep,
}

/// Execute worker commands
pub async fn execute(args: &WorkerArgs, config: &AppConfig) -> Result<(), AppError> {
    let services = super::build_services(config).await?;

    match &args.command {
        WorkerCommand::Run => {
            if !config.worker.enabled {
                output::print_warning("Worker is disabled in configuration");
                return Ok(());
            }

            let mut scheduler =
                CronScheduler::new(services.retention.clone(), config.worker.clone()).await?;
            scheduler.register_default_tasks().await?;
            scheduler.start().await?;

            println!("Worker running. Press Ctrl-C to stop.");
            tokio::signal::ctrl_c().await.map_err(|e| {
                AppError::internal(format!("Failed to listen for shutdown signal: {e}"))
            })?;

            scheduler.shutdown().await?;
            output::print_success("Worker stopped");
        }
        WorkerCommand::Sweep => {
            let deleted = services.retention.sweep_expired().await;
            output::print_success(&format!("Retention sweep removed {deleted} revisions"));
        }
    }

    Ok(())
}
