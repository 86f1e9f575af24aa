//! Initialization CLI command.

use clap::Args;

use crate::output;
use revhub_core::error::AppError;
use revhub_core::config::AppConfig;
use revhub_core::types::AssetKind;

/// Arguments for the init command
#[derive(Debug, Args)]
pub struct InitArgs {}

/// Execute the init command
///
/// Applies pending migrations (when the PostgreSQL backend is active)
/// and writes starter content to any live asset file that does not
/// exist yet. Existing files are left untouched.
pub async fn execute(_args: &InitArgs, config: &AppConfig) -> Result<(), AppError> {
    let services = super::build_services(config).await?;

    match services.provider.pool() {
        Some(pool) => {
            revhub_database::migration::run_migrations(pool.pool()).await?;
            output::print_success("Database migrations applied");
        }
        None => {
            output::print_warning("Memory backend active, no migrations to apply");
        }
    }

    for kind in AssetKind::ALL {
        if services.assets.exists(kind).await? {
            output::print_kv(kind.as_str(), &format!("{} already present", kind.file_name()));
        } else {
            services.assets.write(kind, kind.starter_content()).await?;
            output::print_success(&format!("Seeded {} ({})", kind, kind.file_name()));
        }
    }

    Ok(())
}
