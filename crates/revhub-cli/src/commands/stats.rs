//! Revision statistics CLI command.

use clap::Args;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use revhub_core::config::AppConfig;
use revhub_core::error::AppError;

/// Arguments for the stats command
#[derive(Debug, Args)]
pub struct StatsArgs {}

/// Statistics display row
#[derive(Debug, Serialize, Tabled)]
struct StatsRow {
    /// File
    file: String,
    /// Revision count
    revisions: i64,
    /// Total stored bytes
    bytes: i64,
    /// Oldest revision
    oldest: String,
    /// Newest revision
    newest: String,
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Execute the stats command
pub async fn execute(
    _args: &StatsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::build_services(config).await?;
    let stats = services.revisions.stats().await?;

    let rows: Vec<StatsRow> = stats
        .iter()
        .map(|s| StatsRow {
            file: s.file_key.to_string(),
            revisions: s.revision_count,
            bytes: s.total_payload_bytes,
            oldest: format_time(s.oldest_at),
            newest: format_time(s.newest_at),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
