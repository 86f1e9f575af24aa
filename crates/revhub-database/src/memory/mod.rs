//! In-memory repository backend.
//!
//! Backs the repository contracts with `tokio::sync::Mutex`-guarded
//! state. Suitable for single-process trials and tests only; nothing
//! survives a restart.

pub mod restore_log;
pub mod revision;

pub use restore_log::MemoryRestoreLogRepository;
pub use revision::MemoryRevisionRepository;
