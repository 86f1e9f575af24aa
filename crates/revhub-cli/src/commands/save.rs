//! Save CLI command.

use clap::Args;

use crate::output;
use revhub_core::config::AppConfig;
use revhub_core::error::AppError;

/// Arguments for the save command
#[derive(Debug, Args)]
pub struct SaveArgs {
    /// File to save: "script" or "stylesheet"
    pub file: String,

    /// Comment describing the change
    #[arg(short, long)]
    pub comment: Option<String>,
}

/// Execute the save command
pub async fn execute(args: &SaveArgs, config: &AppConfig, actor: &str) -> Result<(), AppError> {
    let file_key = super::parse_file_key(&args.file)?;
    let services = super::build_services(config).await?;

    let content = services
        .assets
        .read(file_key)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!(
                "No live {file_key} file to save; run 'revhub init' first"
            ))
        })?;

    let ctx = super::request_context(actor);
    let created = services
        .revisions
        .create_revision(&ctx, file_key, &content, args.comment.as_deref())
        .await?;

    output::print_success(&format!(
        "Saved revision {} of {} ({} bytes)",
        created.sequence_number,
        file_key,
        content.len()
    ));
    Ok(())
}
