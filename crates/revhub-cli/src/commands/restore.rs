//! Restore CLI command.

use clap::Args;

use crate::output;
use revhub_core::config::AppConfig;
use revhub_core::error::AppError;

/// Arguments for the restore command
#[derive(Debug, Args)]
pub struct RestoreArgs {
    /// File to restore: "script" or "stylesheet"
    pub file: String,

    /// Sequence number of the revision to restore
    pub sequence: i32,

    /// Note recorded in the restore log
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

/// Execute the restore command
pub async fn execute(args: &RestoreArgs, config: &AppConfig, actor: &str) -> Result<(), AppError> {
    let file_key = super::parse_file_key(&args.file)?;
    let services = super::build_services(config).await?;
    let target = super::resolve_revision(&services, file_key, args.sequence).await?;

    if !args.yes {
        let prompt = format!(
            "Restore {} to revision {} (saved {} by {})? The current live content is backed up first.",
            file_key,
            target.sequence_number,
            target.created_at.format("%Y-%m-%d %H:%M"),
            target.created_by
        );
        let confirm = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let ctx = super::request_context(actor);
    let outcome = services
        .restore
        .restore(&ctx, target.id, args.notes.as_deref())
        .await?;

    output::print_success(&format!(
        "Restored {} to revision {}",
        file_key, target.sequence_number
    ));
    match outcome.backup_revision_id {
        Some(backup_id) => {
            let backup = services.revisions.get_revision(backup_id).await?;
            output::print_kv(
                "Backup",
                &format!("revision {} ({})", backup.sequence_number, super::short_id(backup_id)),
            );
        }
        None => output::print_kv("Backup", "none (no prior live content)"),
    }
    output::print_kv("Live bytes", &outcome.content.len().to_string());
    Ok(())
}
