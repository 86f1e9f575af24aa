//! Request context carrying the acting identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current operation.
///
/// The surrounding application authenticates the caller before this
/// layer is reached; services only need to know who is acting so that
/// revisions and restore-log entries can be attributed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Correlation id for the operation, attached to log output.
    pub request_id: Uuid,
    /// Identity of the acting user.
    pub actor: String,
    /// When the operation was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Create a context for the given actor, stamped with the current time.
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            actor: actor.into(),
            request_time: Utc::now(),
        }
    }
}
