//! Replay of stored revision chains back into full file content.

use revhub_core::error::{AppError, ErrorKind};
use revhub_core::result::AppResult;
use revhub_diff::{LineDiff, apply_diff};
use revhub_entity::revision::Revision;

/// Replay an ascending revision chain into the content of its final
/// revision.
///
/// The chain must begin with a snapshot. Each diff revision is parsed
/// and applied to the content accumulated so far; a later snapshot
/// replaces the accumulator outright.
pub(crate) fn replay(chain: &[Revision]) -> AppResult<String> {
    let Some(base) = chain.first() else {
        return Err(AppError::internal("Cannot replay an empty revision chain"));
    };
    if base.is_diff {
        return Err(AppError::corrupt_chain(format!(
            "Chain for {} starts with a diff at sequence {}, expected a snapshot",
            base.file_key, base.sequence_number
        )));
    }

    let mut content = base.payload.clone();
    for revision in &chain[1..] {
        if !revision.is_diff {
            content = revision.payload.clone();
            continue;
        }
        let diff: LineDiff = serde_json::from_str(&revision.payload).map_err(|e| {
            AppError::with_source(
                ErrorKind::CorruptChain,
                format!(
                    "Revision {} of {} holds an unreadable diff payload",
                    revision.sequence_number, revision.file_key
                ),
                e,
            )
        })?;
        content = apply_diff(&content, &diff).map_err(|e| {
            AppError::with_source(
                ErrorKind::CorruptChain,
                format!(
                    "Diff at sequence {} of {} does not apply to the preceding content",
                    revision.sequence_number, revision.file_key
                ),
                e,
            )
        })?;
    }
    Ok(content)
}
