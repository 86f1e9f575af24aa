//! Edit-script computation and replay.

use thiserror::Error;

use crate::script::{DiffOp, LineDiff};

/// Replay failure: the script does not fit the base text it was applied to.
///
/// This cannot happen when a script is replayed against the same base it
/// was computed from; it exists as an integrity guard against corrupted
/// or misfiled payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// The script consumed more base lines than the base text contains.
    #[error(
        "edit script ran past the end of its base text at operation {op_index} \
         (base has {base_lines} lines)"
    )]
    BaseExhausted {
        /// Index of the offending operation within the script.
        op_index: usize,
        /// Number of lines in the base text.
        base_lines: usize,
    },
}

/// Compute the edit script that transforms `base` into `derived`.
///
/// The comparison is a greedy, position-aligned walk: while the lines
/// under both cursors are equal, a `Keep` is emitted; at the first
/// divergence the base line is deleted and the derived line inserted,
/// and both cursors advance. Whatever remains of the longer text is
/// drained as trailing deletes or inserts. The result is deterministic
/// and linear in the input size, but not minimal — acceptable for small
/// hand-edited files, where only the round-trip law is load-bearing.
///
/// Any two inputs, including empty strings, produce a valid script.
pub fn compute_diff(base: &str, derived: &str) -> LineDiff {
    let base_lines = split_lines(base);
    let derived_lines = split_lines(derived);

    let mut ops = Vec::new();
    let mut b = 0;
    let mut d = 0;

    while b < base_lines.len() && d < derived_lines.len() {
        if base_lines[b] == derived_lines[d] {
            ops.push(DiffOp::Keep);
        } else {
            ops.push(DiffOp::Delete);
            ops.push(DiffOp::Insert(derived_lines[d].to_string()));
        }
        b += 1;
        d += 1;
    }

    while b < base_lines.len() {
        ops.push(DiffOp::Delete);
        b += 1;
    }

    while d < derived_lines.len() {
        ops.push(DiffOp::Insert(derived_lines[d].to_string()));
        d += 1;
    }

    LineDiff::new(ops)
}

/// Replay an edit script against a base text.
///
/// `Keep` copies the next base line, `Delete` skips it, `Insert` emits
/// the stored line. For a script produced by [`compute_diff`] this
/// reconstructs the original `derived` text exactly.
pub fn apply_diff(base: &str, diff: &LineDiff) -> Result<String, DiffError> {
    let base_lines = split_lines(base);
    let mut cursor = 0usize;
    let mut output: Vec<&str> = Vec::new();

    for (op_index, op) in diff.ops().iter().enumerate() {
        match op {
            DiffOp::Keep => {
                let line = base_lines.get(cursor).ok_or(DiffError::BaseExhausted {
                    op_index,
                    base_lines: base_lines.len(),
                })?;
                output.push(line);
                cursor += 1;
            }
            DiffOp::Delete => {
                if cursor >= base_lines.len() {
                    return Err(DiffError::BaseExhausted {
                        op_index,
                        base_lines: base_lines.len(),
                    });
                }
                cursor += 1;
            }
            DiffOp::Insert(line) => output.push(line.as_str()),
        }
    }

    Ok(output.join("\n"))
}

/// Split a text into lines on `\n`.
///
/// `split` (not `str::lines`) so that a trailing terminator yields a
/// final empty line and the join is an exact inverse.
fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip(base: &str, derived: &str) {
        let diff = compute_diff(base, derived);
        let rebuilt = apply_diff(base, &diff).expect("replay against own base");
        assert_eq!(rebuilt, derived, "base={base:?} derived={derived:?}");
    }

    #[test]
    fn test_round_trip_simple_edit() {
        assert_round_trip("a\nb\nc", "a\nx\nc");
    }

    #[test]
    fn test_round_trip_empty_base() {
        assert_round_trip("", "x\ny");
    }

    #[test]
    fn test_round_trip_empty_derived() {
        assert_round_trip("x\ny", "");
    }

    #[test]
    fn test_round_trip_both_empty() {
        assert_round_trip("", "");
    }

    #[test]
    fn test_identical_texts_diff_is_all_keep() {
        let text = "a\nb\nc";
        let diff = compute_diff(text, text);
        assert!(diff.ops().iter().all(|op| matches!(op, DiffOp::Keep)));
        assert_eq!(apply_diff(text, &diff).unwrap(), text);
    }

    #[test]
    fn test_round_trip_derived_is_strict_prefix() {
        assert_round_trip("a\nb\nc", "a\nb");
    }

    #[test]
    fn test_round_trip_lines_inserted_in_middle() {
        assert_round_trip("a\nd", "a\nb\nc\nd");
    }

    #[test]
    fn test_round_trip_trailing_newline_changes() {
        assert_round_trip("a", "a\n");
        assert_round_trip("a\n", "a");
        assert_round_trip("a\nb", "a\nb\n");
        assert_round_trip("a\nb\n", "a\nb");
    }

    #[test]
    fn test_carriage_return_is_line_content() {
        assert_round_trip("a\r\nb", "a\nb");
        assert_round_trip("a\nb", "a\r\nb");
    }

    #[test]
    fn test_compute_is_deterministic() {
        let first = compute_diff("one\ntwo\nthree", "one\n2\nthree\nfour");
        let second = compute_diff("one\ntwo\nthree", "one\n2\nthree\nfour");
        assert_eq!(first, second);
    }

    #[test]
    fn test_greedy_walk_shape() {
        // Position-aligned: "a" vs "b" diverges immediately, then the
        // leftover base line is drained as a delete.
        let diff = compute_diff("a\nb", "b");
        assert_eq!(
            diff.ops(),
            &[
                DiffOp::Delete,
                DiffOp::Insert("b".to_string()),
                DiffOp::Delete,
            ]
        );
    }

    #[test]
    fn test_apply_rejects_script_larger_than_base() {
        let diff = compute_diff("a\nb\nc", "a\nb\nc");
        let err = apply_diff("a", &diff).unwrap_err();
        assert_eq!(
            err,
            DiffError::BaseExhausted {
                op_index: 1,
                base_lines: 1,
            }
        );
    }

    #[test]
    fn test_apply_ignores_unconsumed_base_tail() {
        // A shorter script simply leaves trailing base lines behind;
        // only overconsumption is an integrity failure.
        let diff = compute_diff("a", "a");
        assert_eq!(apply_diff("a\nb\nc", &diff).unwrap(), "a");
    }
}
