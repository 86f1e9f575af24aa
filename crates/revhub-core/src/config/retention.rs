//! Revision retention configuration.

use serde::{Deserialize, Serialize};

/// Retention bounds for stored revisions.
///
/// The per-file cap is enforced after every revision creation; the age
/// horizon is applied by the scheduled sweep. Restore-log entries are
/// never pruned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Maximum number of revisions retained per file.
    #[serde(default = "default_max_revisions")]
    pub max_revisions_per_file: i64,
    /// Maximum revision age in days before the sweep removes it.
    #[serde(default = "default_max_age_days")]
    pub max_age_days: i64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            max_revisions_per_file: default_max_revisions(),
            max_age_days: default_max_age_days(),
        }
    }
}

fn default_max_revisions() -> i64 {
    50
}

fn default_max_age_days() -> i64 {
    90
}
