//! History export CLI command.

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use uuid::Uuid;

use crate::output;
use revhub_core::config::AppConfig;
use revhub_core::error::AppError;

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// File to export: "script" or "stylesheet"
    pub file: String,

    /// Output file path (defaults to "{file}-history.json")
    #[arg(short, long)]
    pub output: Option<String>,
}

/// One exported revision with its reconstructed content.
#[derive(Debug, Serialize)]
struct ExportedRevision {
    id: Uuid,
    sequence_number: i32,
    is_diff: bool,
    comment: Option<String>,
    created_by: String,
    created_at: DateTime<Utc>,
    content: String,
}

/// Execute the export command
pub async fn execute(args: &ExportArgs, config: &AppConfig) -> Result<(), AppError> {
    let file_key = super::parse_file_key(&args.file)?;
    let services = super::build_services(config).await?;

    let mut summaries = services.revisions.list_revisions(file_key, None).await?;
    summaries.reverse();

    let mut exported = Vec::with_capacity(summaries.len());
    for summary in summaries {
        let content = services
            .revisions
            .reconstruct(file_key, summary.sequence_number)
            .await?;
        exported.push(ExportedRevision {
            id: summary.id,
            sequence_number: summary.sequence_number,
            is_diff: summary.is_diff,
            comment: summary.comment,
            created_by: summary.created_by,
            created_at: summary.created_at,
            content,
        });
    }

    let out_path = args
        .output
        .clone()
        .unwrap_or_else(|| format!("{file_key}-history.json"));
    let json = serde_json::to_string_pretty(&exported)?;
    tokio::fs::write(&out_path, json).await?;

    output::print_success(&format!(
        "Exported {} revisions of {} to '{}'",
        exported.len(),
        file_key,
        out_path
    ));
    Ok(())
}
