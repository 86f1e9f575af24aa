//! # revhub-database
//!
//! Repository contracts for revision and restore-log persistence, their
//! PostgreSQL implementations, and an in-memory backend for
//! single-process trials and tests. The backend is selected at runtime
//! through [`RepositoryProvider`].

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;

pub use connection::DatabasePool;
pub use provider::RepositoryProvider;
pub use repositories::{RestoreLogRepository, RevisionRepository};
