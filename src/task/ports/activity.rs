//! Append-only port for the activity audit trail.

use crate::task::domain::{ActivityLogEntry, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for activity log operations.
pub type ActivityLogResult<T> = Result<T, ActivityLogError>;

/// Audit trail contract. Entries are append-only; there is no update or
/// delete operation by design.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Appends one immutable entry.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityLogError::Persistence`] when the append fails. The
    /// mutation service logs and swallows this; an audit failure never
    /// unwinds the committed task write.
    async fn append(&self, entry: &ActivityLogEntry) -> ActivityLogResult<()>;

    /// Returns the entries recorded for a task, oldest first.
    async fn entries_for_task(&self, task_id: TaskId) -> ActivityLogResult<Vec<ActivityLogEntry>>;
}

/// Errors returned by activity log implementations.
#[derive(Debug, Clone, Error)]
pub enum ActivityLogError {
    /// Persistence-layer failure.
    #[error("activity log error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActivityLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
