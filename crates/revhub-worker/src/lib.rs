//! Scheduled maintenance tasks for RevHub.
//!
//! Provides the cron scheduler that runs the periodic retention sweep.
//! The scheduler owns no business logic; it drives the retention
//! service at the configured cadence.

pub mod scheduler;

pub use scheduler::CronScheduler;
