//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Scheduled maintenance worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression (seconds-resolution, 6 fields) for the retention sweep.
    #[serde(default = "default_sweep_schedule")]
    pub sweep_schedule: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            sweep_schedule: default_sweep_schedule(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Daily at 4 AM.
fn default_sweep_schedule() -> String {
    "0 0 4 * * *".to_string()
}
