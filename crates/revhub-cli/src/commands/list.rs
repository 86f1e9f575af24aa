//! Revision listing CLI command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use revhub_core::config::AppConfig;
use revhub_core::error::AppError;

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// File to list: "script" or "stylesheet"
    pub file: String,

    /// Maximum number of revisions to show
    #[arg(short, long)]
    pub limit: Option<i64>,
}

/// Revision display row
#[derive(Debug, Serialize, Tabled)]
struct RevisionRow {
    /// Sequence number
    sequence: i32,
    /// Stored form
    stored: String,
    /// Creation time
    created: String,
    /// Author
    author: String,
    /// Comment
    comment: String,
    /// Payload size
    bytes: i64,
}

/// Execute the list command
pub async fn execute(
    args: &ListArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let file_key = super::parse_file_key(&args.file)?;
    let services = super::build_services(config).await?;

    let summaries = services
        .revisions
        .list_revisions(file_key, args.limit)
        .await?;

    let rows: Vec<RevisionRow> = summaries
        .iter()
        .map(|s| RevisionRow {
            sequence: s.sequence_number,
            stored: if s.is_diff { "diff" } else { "snapshot" }.to_string(),
            created: s.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            author: s.created_by.clone(),
            comment: s.comment.clone().unwrap_or_default(),
            bytes: s.payload_bytes,
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
