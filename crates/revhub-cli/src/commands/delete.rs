//! Revision deletion CLI command.

use clap::Args;

use crate::output;
use revhub_core::config::AppConfig;
use revhub_core::error::AppError;

/// Arguments for the delete command
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// File the revision belongs to: "script" or "stylesheet"
    pub file: String,

    /// Sequence number of the revision to delete
    pub sequence: i32,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

/// Execute the delete command
pub async fn execute(args: &DeleteArgs, config: &AppConfig) -> Result<(), AppError> {
    let file_key = super::parse_file_key(&args.file)?;
    let services = super::build_services(config).await?;
    let target = super::resolve_revision(&services, file_key, args.sequence).await?;

    if !args.yes {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Delete revision {} of {} (saved {} by {})? This cannot be undone.",
                target.sequence_number,
                file_key,
                target.created_at.format("%Y-%m-%d %H:%M"),
                target.created_by
            ))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    services.revisions.delete_revision(target.id).await?;
    output::print_success(&format!(
        "Deleted revision {} of {}",
        target.sequence_number, file_key
    ));
    Ok(())
}
