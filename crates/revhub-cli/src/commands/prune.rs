//! Manual retention CLI command.

use clap::Args;

use crate::output;
use revhub_core::config::AppConfig;
use revhub_core::error::AppError;
use revhub_core::types::AssetKind;

/// Arguments for the prune command
#[derive(Debug, Args)]
pub struct PruneArgs {}

/// Execute the prune command
///
/// Runs the retention policy immediately instead of waiting for the
/// scheduled sweep: first the age sweep, then the per-file cap.
pub async fn execute(_args: &PruneArgs, config: &AppConfig) -> Result<(), AppError> {
    let services = super::build_services(config).await?;

    let swept = services.retention.sweep_expired().await;
    let mut capped = 0;
    for kind in AssetKind::ALL {
        capped += services.retention.enforce_revision_cap(kind).await?;
    }

    output::print_success(&format!(
        "Pruned {swept} expired and {capped} over-cap revisions"
    ));
    Ok(())
}
