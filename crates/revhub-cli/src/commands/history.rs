//! Restore log CLI command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use revhub_core::config::AppConfig;
use revhub_core::error::AppError;
use revhub_core::types::PageRequest;

/// Arguments for the history command
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Limit to one file: "script" or "stylesheet"
    #[arg(long)]
    pub file: Option<String>,

    /// Page to show
    #[arg(long, default_value = "1")]
    pub page: u64,

    /// Entries per page
    #[arg(long, default_value = "20")]
    pub per_page: u64,
}

/// Restore log display row
#[derive(Debug, Serialize, Tabled)]
struct HistoryRow {
    /// Time
    time: String,
    /// File
    file: String,
    /// Kind
    kind: String,
    /// Restored revision
    restored: String,
    /// Backup revision
    backup: String,
    /// Actor
    actor: String,
    /// Notes
    notes: String,
}

/// Reference display: sequence when the revision survives, truncated id
/// when retention has pruned it.
fn reference(sequence: Option<i32>, id: Uuid) -> String {
    match sequence {
        Some(sequence) => format!("#{sequence}"),
        None => format!("{} (pruned)", super::short_id(id)),
    }
}

/// Execute the history command
pub async fn execute(
    args: &HistoryArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let file_key = args
        .file
        .as_deref()
        .map(super::parse_file_key)
        .transpose()?;
    let services = super::build_services(config).await?;

    let page = PageRequest::new(args.page, args.per_page);
    let response = services.history.list_history(file_key, &page).await?;

    let rows: Vec<HistoryRow> = response
        .items
        .iter()
        .map(|r| HistoryRow {
            time: r.performed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            file: r.file_key.to_string(),
            kind: r.kind.to_string(),
            restored: reference(r.restored_sequence, r.restored_revision_id),
            backup: match r.previous_revision_id {
                Some(id) => reference(r.previous_sequence, id),
                None => "-".to_string(),
            },
            actor: r.actor.clone(),
            notes: r.notes.clone().unwrap_or_default(),
        })
        .collect();

    output::print_list(&rows, format);
    if format == OutputFormat::Table {
        output::print_page_footer(&response);
    }
    Ok(())
}
