//! CLI command definitions and dispatch.

pub mod delete;
pub mod diff;
pub mod export;
pub mod history;
pub mod init;
pub mod list;
pub mod prune;
pub mod restore;
pub mod save;
pub mod show;
pub mod stats;
pub mod worker;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use revhub_core::config::AppConfig;
use revhub_core::error::AppError;
use revhub_core::result::AppResult;
use revhub_core::traits::AssetStore;
use revhub_core::types::AssetKind;
use revhub_database::RepositoryProvider;
use revhub_entity::revision::RevisionSummary;
use revhub_service::{
    HistoryService, RequestContext, RestoreService, RetentionService, RevisionService,
};
use revhub_storage::LocalAssetStore;

/// RevHub — revision vault for editable site assets
#[derive(Debug, Parser)]
#[command(name = "revhub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (merges config/default.toml with config/{env}.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Acting user recorded on revisions and restores
    #[arg(short, long, default_value = "admin")]
    pub actor: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply migrations and seed missing live asset files
    Init(init::InitArgs),
    /// Record the current live content as a new revision
    Save(save::SaveArgs),
    /// List the revision history of a file
    List(list::ListArgs),
    /// Print the full content of a revision
    Show(show::ShowArgs),
    /// Compare two revisions, or a revision against the live file
    Diff(diff::DiffArgs),
    /// Restore the live file to a stored revision
    Restore(restore::RestoreArgs),
    /// Browse the restore log
    History(history::HistoryArgs),
    /// Delete a revision from either end of a chain
    Delete(delete::DeleteArgs),
    /// Run the retention policy now
    Prune(prune::PruneArgs),
    /// Per-file revision statistics
    Stats(stats::StatsArgs),
    /// Export a file's full history to JSON
    Export(export::ExportArgs),
    /// Scheduled maintenance worker
    Worker(worker::WorkerArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Init(args) => init::execute(args, config).await,
            Commands::Save(args) => save::execute(args, config, &self.actor).await,
            Commands::List(args) => list::execute(args, config, self.format).await,
            Commands::Show(args) => show::execute(args, config, self.format).await,
            Commands::Diff(args) => diff::execute(args, config, self.format).await,
            Commands::Restore(args) => restore::execute(args, config, &self.actor).await,
            Commands::History(args) => history::execute(args, config, self.format).await,
            Commands::Delete(args) => delete::execute(args, config).await,
            Commands::Prune(args) => prune::execute(args, config).await,
            Commands::Stats(args) => stats::execute(args, config, self.format).await,
            Commands::Export(args) => export::execute(args, config).await,
            Commands::Worker(args) => worker::execute(args, config).await,
        }
    }
}

/// Helper: load configuration for the given environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// The wired service stack shared by the commands.
pub struct ServiceBundle {
    pub provider: RepositoryProvider,
    pub assets: Arc<dyn AssetStore>,
    pub revisions: Arc<RevisionService>,
    pub history: Arc<HistoryService>,
    pub restore: Arc<RestoreService>,
    pub retention: Arc<RetentionService>,
}

/// Helper: wire the full service stack from configuration
pub async fn build_services(config: &AppConfig) -> AppResult<ServiceBundle> {
    let provider = RepositoryProvider::connect(&config.database).await?;
    let assets: Arc<dyn AssetStore> = Arc::new(LocalAssetStore::new(&config.storage).await?);

    let retention = Arc::new(RetentionService::new(
        provider.revisions(),
        config.retention.clone(),
    ));
    let revisions = Arc::new(RevisionService::new(
        provider.revisions(),
        retention.clone(),
    ));
    let history = Arc::new(HistoryService::new(
        provider.restore_log(),
        provider.revisions(),
    ));
    let restore = Arc::new(RestoreService::new(
        revisions.clone(),
        history.clone(),
        assets.clone(),
    ));

    Ok(ServiceBundle {
        provider,
        assets,
        revisions,
        history,
        restore,
        retention,
    })
}

/// Helper: parse a file key argument ("script" or "stylesheet")
pub fn parse_file_key(raw: &str) -> AppResult<AssetKind> {
    raw.parse()
}

/// Helper: resolve a (file, sequence) pair to its revision metadata
pub async fn resolve_revision(
    services: &ServiceBundle,
    file_key: AssetKind,
    sequence: i32,
) -> AppResult<RevisionSummary> {
    services
        .revisions
        .list_revisions(file_key, None)
        .await?
        .into_iter()
        .find(|summary| summary.sequence_number == sequence)
        .ok_or_else(|| {
            AppError::not_found(format!("Revision {sequence} of {file_key} not found"))
        })
}

/// Helper: request context for the acting user
pub fn request_context(actor: &str) -> RequestContext {
    RequestContext::new(actor)
}

/// Helper: first eight characters of a UUID for compact display
pub fn short_id(id: uuid::Uuid) -> String {
    id.to_string()[..8].to_string()
}
