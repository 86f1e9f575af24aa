//! Revision management — saving, reconstructing, listing, and deleting
//! revisions of the live assets.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use revhub_core::error::{AppError, ErrorKind};
use revhub_core::result::AppResult;
use revhub_core::types::AssetKind;
use revhub_database::RevisionRepository;
use revhub_diff::compute_diff;
use revhub_entity::revision::{FileStats, NewRevision, Revision, RevisionSummary};

use crate::chain;
use crate::context::RequestContext;
use crate::retention::RetentionService;

/// Manages the per-file revision chains.
#[derive(Debug, Clone)]
pub struct RevisionService {
    repo: Arc<dyn RevisionRepository>,
    retention: Arc<RetentionService>,
}

impl RevisionService {
    /// Create a new revision service.
    pub fn new(repo: Arc<dyn RevisionRepository>, retention: Arc<RetentionService>) -> Self {
        Self { repo, retention }
    }

    /// Save the given live content as a new revision of `file_key`.
    ///
    /// The first revision of a file stores the content verbatim; every
    /// later revision stores an edit script against the reconstructed
    /// content of the revision before it. A sequence collision with a
    /// concurrent save is retried once against the fresh head.
    pub async fn create_revision(
        &self,
        ctx: &RequestContext,
        file_key: AssetKind,
        live_content: &str,
        comment: Option<&str>,
    ) -> AppResult<Revision> {
        if live_content.is_empty() {
            return Err(AppError::validation(format!(
                "Refusing to record an empty revision of {file_key}"
            )));
        }

        let data = self
            .build_revision(ctx, file_key, live_content, comment)
            .await?;
        let created = match self.repo.insert(&data).await {
            Ok(created) => created,
            Err(e) if e.is_kind(ErrorKind::Conflict) => {
                warn!(
                    file_key = %file_key,
                    sequence = data.sequence_number,
                    "Sequence taken by a concurrent save, retrying against the new head"
                );
                let data = self
                    .build_revision(ctx, file_key, live_content, comment)
                    .await?;
                self.repo.insert(&data).await?
            }
            Err(e) => return Err(e),
        };

        info!(
            request_id = %ctx.request_id,
            file_key = %file_key,
            revision_id = %created.id,
            sequence = created.sequence_number,
            is_diff = created.is_diff,
            created_by = %created.created_by,
            "Revision created"
        );

        if let Err(e) = self.retention.enforce_revision_cap(file_key).await {
            warn!(file_key = %file_key, error = %e, "Revision cap enforcement failed");
        }

        Ok(created)
    }

    /// Compute the payload and sequence number for the next revision.
    async fn build_revision(
        &self,
        ctx: &RequestContext,
        file_key: AssetKind,
        live_content: &str,
        comment: Option<&str>,
    ) -> AppResult<NewRevision> {
        let (sequence_number, payload, is_diff) = match self.repo.find_head(file_key).await? {
            None => (1, live_content.to_string(), false),
            Some(head) => {
                let base = self.reconstruct(file_key, head.sequence_number).await?;
                let diff = compute_diff(&base, live_content);
                (
                    head.sequence_number + 1,
                    serde_json::to_string(&diff)?,
                    true,
                )
            }
        };
        Ok(NewRevision {
            file_key,
            sequence_number,
            payload,
            is_diff,
            comment: comment.map(String::from),
            created_by: ctx.actor.clone(),
        })
    }

    /// Reconstruct the full content of the revision with the given
    /// sequence number.
    pub async fn reconstruct(&self, file_key: AssetKind, sequence_number: i32) -> AppResult<String> {
        let chain = self.repo.find_chain(file_key, sequence_number).await?;
        match chain.last() {
            Some(last) if last.sequence_number == sequence_number => chain::replay(&chain),
            _ => Err(AppError::not_found(format!(
                "Revision {sequence_number} of {file_key} not found"
            ))),
        }
    }

    /// Fetch a revision record by id.
    pub async fn get_revision(&self, revision_id: Uuid) -> AppResult<Revision> {
        self.repo
            .find_by_id(revision_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Revision {revision_id} not found")))
    }

    /// Reconstruct the full content of a revision by id.
    pub async fn get_revision_content(&self, revision_id: Uuid) -> AppResult<String> {
        let revision = self.get_revision(revision_id).await?;
        self.reconstruct(revision.file_key, revision.sequence_number)
            .await
    }

    /// List revision metadata for a file, newest first.
    pub async fn list_revisions(
        &self,
        file_key: AssetKind,
        limit: Option<i64>,
    ) -> AppResult<Vec<RevisionSummary>> {
        self.repo.list(file_key, limit).await
    }

    /// Per-file revision statistics.
    pub async fn stats(&self) -> AppResult<Vec<FileStats>> {
        self.repo.stats().await
    }

    /// Delete a single revision from either end of its chain.
    ///
    /// Only the oldest or the newest revision of a file may be removed;
    /// carving a revision out of the middle would invalidate every diff
    /// above it. When the oldest goes, its successor is first rewritten
    /// as a snapshot so the chain keeps a valid base.
    pub async fn delete_revision(&self, revision_id: Uuid) -> AppResult<()> {
        let revision = self.get_revision(revision_id).await?;
        let file_key = revision.file_key;
        let sequence = revision.sequence_number;
        let Some((min_sequence, max_sequence)) = self.repo.sequence_bounds(file_key).await? else {
            return Err(AppError::not_found(format!(
                "No revisions recorded for {file_key}"
            )));
        };

        if sequence != min_sequence && sequence != max_sequence {
            return Err(AppError::validation(format!(
                "Only the oldest (sequence {min_sequence}) or newest (sequence {max_sequence}) \
                 revision of {file_key} may be deleted, not sequence {sequence}"
            )));
        }

        if sequence == min_sequence && sequence != max_sequence {
            // The successor becomes the new chain base. Promote it to a
            // snapshot before deleting under it, so an interruption between
            // the two steps never strands a diff at the bottom.
            let chain = self.repo.find_chain(file_key, sequence + 1).await?;
            match chain.last() {
                Some(successor) if successor.sequence_number > sequence => {
                    if successor.is_diff {
                        let content = chain::replay(&chain)?;
                        self.repo
                            .promote_to_snapshot(successor.id, &content)
                            .await?;
                    }
                }
                _ => {
                    return Err(AppError::corrupt_chain(format!(
                        "Revision {sequence} of {file_key} has no successor to promote"
                    )));
                }
            }
        }

        let deleted = self.repo.delete(revision_id).await?;
        if !deleted {
            return Err(AppError::not_found(format!(
                "Revision {revision_id} not found"
            )));
        }

        info!(
            file_key = %file_key,
            revision_id = %revision_id,
            sequence,
            "Revision deleted"
        );
        Ok(())
    }
}
