//! # revhub-diff
//!
//! Line-oriented edit scripts between two texts: computation, replay,
//! and the serialized form persisted as a revision payload.
//!
//! The engine is pure and performs no I/O. Its single load-bearing
//! contract is the round-trip law: for any texts `base` and `derived`,
//!
//! ```
//! # use revhub_diff::{apply_diff, compute_diff};
//! # let (base, derived) = ("a\nb", "a\nc\n");
//! assert_eq!(apply_diff(base, &compute_diff(base, derived)).unwrap(), derived);
//! ```
//!
//! ## Line model
//!
//! Texts are split on `\n`. A trailing line without a terminator counts
//! as a line, and a trailing terminator produces a final empty line, so
//! joining the lines with `\n` reproduces every input byte-for-byte —
//! including the empty text, which is modeled as a single empty line.
//! `\r` is treated as line content, not as a terminator.

mod engine;
mod script;

pub use engine::{DiffError, apply_diff, compute_diff};
pub use script::{DiffOp, LineDiff};
