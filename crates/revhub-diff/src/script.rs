//! The persisted edit-script representation.

use serde::{Deserialize, Serialize};

/// A single line operation in an edit script.
///
/// Serialized with serde's default enum representation, so a script
/// renders as JSON like `["Keep","Delete",{"Insert":"new line"}]`.
/// This form is stored verbatim as a revision payload; changing it
/// breaks replay of existing histories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffOp {
    /// Copy the next base line to the output.
    Keep,
    /// Skip the next base line without emitting it.
    Delete,
    /// Emit the stored line without consuming a base line.
    Insert(String),
}

/// An ordered edit script transforming a base text into a derived text.
///
/// Produced by [`compute_diff`](crate::compute_diff) and replayed by
/// [`apply_diff`](crate::apply_diff). Given the base text, the script is
/// sufficient to reconstruct the derived text exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineDiff {
    ops: Vec<DiffOp>,
}

impl LineDiff {
    /// Build a script from an operation sequence.
    pub(crate) fn new(ops: Vec<DiffOp>) -> Self {
        Self { ops }
    }

    /// The operations in replay order.
    pub fn ops(&self) -> &[DiffOp] {
        &self.ops
    }

    /// Number of operations in the script.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the script contains no operations (both texts were empty
    /// of lines — which cannot happen for real text, since even the
    /// empty string is one empty line).
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Whether replaying the script can change its base (false means
    /// the script is all-keep).
    pub fn has_changes(&self) -> bool {
        self.ops.iter().any(|op| !matches!(op, DiffOp::Keep))
    }
}
