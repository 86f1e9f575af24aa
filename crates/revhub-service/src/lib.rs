//! # revhub-service
//!
//! Business logic layer for RevHub. Each service owns one slice of the
//! versioning workflow and orchestrates the repositories, the diff
//! engine, and the live asset store to implement it.
//!
//! Services take their dependencies through constructor injection as
//! `Arc` references; there is no ambient global state.

mod chain;
pub mod context;
pub mod history;
pub mod restore;
pub mod retention;
pub mod revision;

pub use context::RequestContext;
pub use history::HistoryService;
pub use restore::{RestoreOutcome, RestoreService};
pub use retention::RetentionService;
pub use revision::RevisionService;
