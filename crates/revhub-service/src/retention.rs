//! Retention enforcement — per-file revision caps and age-based sweeps.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use revhub_core::config::retention::RetentionConfig;
use revhub_core::result::AppResult;
use revhub_core::types::AssetKind;
use revhub_database::RevisionRepository;

use crate::chain;

/// Prunes old revisions while keeping every surviving chain replayable.
///
/// Pruning never deletes blindly from the bottom of a chain: the oldest
/// surviving revision is first rewritten as a full snapshot, and only
/// then is everything below it removed. An interruption between the two
/// steps leaves extra revisions behind, never a broken chain.
#[derive(Debug, Clone)]
pub struct RetentionService {
    repo: Arc<dyn RevisionRepository>,
    config: RetentionConfig,
}

impl RetentionService {
    /// Create a new retention service.
    pub fn new(repo: Arc<dyn RevisionRepository>, config: RetentionConfig) -> Self {
        Self { repo, config }
    }

    /// Enforce the per-file revision cap, returning how many revisions
    /// were pruned.
    ///
    /// Called after every save. Keeps the newest `max_revisions_per_file`
    /// revisions and removes the rest from the bottom of the chain.
    pub async fn enforce_revision_cap(&self, file_key: AssetKind) -> AppResult<u64> {
        let cap = self.config.max_revisions_per_file.max(1);
        let count = self.repo.count(file_key).await?;
        if count <= cap {
            return Ok(0);
        }
        let Some((_, max_sequence)) = self.repo.sequence_bounds(file_key).await? else {
            return Ok(0);
        };

        // Sequence numbers are contiguous, so the newest `cap` revisions
        // occupy the top `cap` sequence values.
        let keep_from = max_sequence - (cap - 1) as i32;
        let deleted = self.truncate_below(file_key, keep_from).await?;
        info!(file_key = %file_key, deleted, cap, "Enforced revision cap");
        Ok(deleted)
    }

    /// Delete revisions older than the configured age horizon.
    pub async fn sweep_expired(&self) -> u64 {
        let cutoff = Utc::now() - Duration::days(self.config.max_age_days.max(0));
        self.sweep_before(cutoff).await
    }

    /// Sweep every file against an explicit cutoff instant.
    ///
    /// Per file, the oldest revision created at or after the cutoff
    /// becomes the new chain base and everything older is removed. When a
    /// file's entire history has expired it is deleted outright. A
    /// failure on one file is logged and does not stop the sweep of the
    /// others.
    pub async fn sweep_before(&self, cutoff: DateTime<Utc>) -> u64 {
        let mut total = 0;
        for file_key in AssetKind::ALL {
            match self.sweep_file(file_key, cutoff).await {
                Ok(deleted) => {
                    if deleted > 0 {
                        info!(file_key = %file_key, deleted, "Swept expired revisions");
                    }
                    total += deleted;
                }
                Err(e) => {
                    warn!(file_key = %file_key, error = %e, "Failed to sweep expired revisions");
                }
            }
        }
        total
    }

    async fn sweep_file(&self, file_key: AssetKind, cutoff: DateTime<Utc>) -> AppResult<u64> {
        match self.repo.find_first_since(file_key, cutoff).await? {
            Some(survivor) => {
                self.truncate_below(file_key, survivor.sequence_number)
                    .await
            }
            None => {
                // Nothing survives the cutoff; drop the whole history.
                let Some((_, max_sequence)) = self.repo.sequence_bounds(file_key).await? else {
                    return Ok(0);
                };
                self.repo.delete_below(file_key, max_sequence + 1).await
            }
        }
    }

    /// Rewrite the revision at `keep_from` as a snapshot if it is a diff,
    /// then delete every revision strictly below it.
    async fn truncate_below(&self, file_key: AssetKind, keep_from: i32) -> AppResult<u64> {
        let chain = self.repo.find_chain(file_key, keep_from).await?;
        let Some(survivor) = chain.last() else {
            return Ok(0);
        };
        if survivor.is_diff {
            let content = chain::replay(&chain)?;
            self.repo
                .promote_to_snapshot(survivor.id, &content)
                .await?;
        }
        self.repo
            .delete_below(file_key, survivor.sequence_number)
            .await
    }
}
