//! # revhub-core
//!
//! Core crate for RevHub. Contains configuration schemas, the asset key
//! type, pagination types, the storage collaborator trait, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other RevHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
