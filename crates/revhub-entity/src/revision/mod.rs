//! Revision domain entities.

pub mod model;
pub mod summary;

pub use model::{NewRevision, Revision};
pub use summary::{FileStats, RevisionSummary};
