//! Restore log domain entities.

pub mod kind;
pub mod model;

pub use kind::RestoreKind;
pub use model::{NewRestoreLogEntry, RestoreLogEntry, RestoreRecord};
