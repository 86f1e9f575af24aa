//! Revision content CLI command.

use clap::Args;

use crate::output::OutputFormat;
use revhub_core::config::AppConfig;
use revhub_core::error::AppError;

/// Arguments for the show command
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// File to read: "script" or "stylesheet"
    pub file: String,

    /// Sequence number of the revision
    pub sequence: i32,
}

/// Execute the show command
pub async fn execute(
    args: &ShowArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let file_key = super::parse_file_key(&args.file)?;
    let services = super::build_services(config).await?;

    let content = services
        .revisions
        .reconstruct(file_key, args.sequence)
        .await?;

    match format {
        OutputFormat::Table => println!("{content}"),
        OutputFormat::Json => {
            let body = serde_json::json!({
                "file_key": file_key,
                "sequence_number": args.sequence,
                "content": content,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&body).unwrap_or_else(|_| "{}".to_string())
            );
        }
    }
    Ok(())
}
