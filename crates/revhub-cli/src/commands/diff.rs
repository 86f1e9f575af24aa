//! Revision comparison CLI command.

use clap::Args;
use similar::{ChangeTag, TextDiff};

use crate::output::OutputFormat;
use revhub_core::config::AppConfig;
use revhub_core::error::AppError;

/// Arguments for the diff command
#[derive(Debug, Args)]
pub struct DiffArgs {
    /// File to compare: "script" or "stylesheet"
    pub file: String,

    /// Sequence number of the older revision
    pub from: i32,

    /// Sequence number of the newer revision; the live file when omitted
    pub to: Option<i32>,
}

/// Execute the diff command
pub async fn execute(
    args: &DiffArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let file_key = super::parse_file_key(&args.file)?;
    let services = super::build_services(config).await?;

    let old = services.revisions.reconstruct(file_key, args.from).await?;
    let (new, new_label) = match args.to {
        Some(sequence) => (
            services.revisions.reconstruct(file_key, sequence).await?,
            format!("revision {sequence}"),
        ),
        None => (
            services.assets.read(file_key).await?.ok_or_else(|| {
                AppError::not_found(format!("No live {file_key} file to compare against"))
            })?,
            "live".to_string(),
        ),
    };

    let rendered = render_unified(
        &old,
        &new,
        &format!("{file_key} @ revision {}", args.from),
        &format!("{file_key} @ {new_label}"),
    );

    match format {
        OutputFormat::Table => match &rendered {
            Some(text) => print!("{text}"),
            None => println!("No differences."),
        },
        OutputFormat::Json => {
            let body = serde_json::json!({
                "file_key": file_key,
                "from": args.from,
                "to": new_label,
                "diff": rendered,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&body).unwrap_or_else(|_| "{}".to_string())
            );
        }
    }
    Ok(())
}

/// Render a unified diff between two strings, or `None` when they match.
fn render_unified(old: &str, new: &str, old_label: &str, new_label: &str) -> Option<String> {
    if old == new {
        return None;
    }

    let diff = TextDiff::from_lines(old, new);
    let mut output = String::new();

    output.push_str(&format!("--- {old_label}\n"));
    output.push_str(&format!("+++ {new_label}\n"));

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            output.push_str("...\n");
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };

                output.push_str(sign);
                output.push_str(change.value());
                if !change.value().ends_with('\n') {
                    output.push('\n');
                }
            }
        }
    }

    Some(output)
}
