//! Caller-visible error taxonomy for the mutation service boundary.

use crate::task::{
    domain::{ActorId, CategoryId, DenialReason, TaskDomainError, TaskId},
    ports::{CategoryDirectoryError, TaskRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Result type for mutation service operations.
pub type TaskEngineResult<T> = Result<T, TaskEngineError>;

/// Coarse failure classification for transport mapping.
///
/// The routing layer maps these to status codes; the engine never learns
/// transport semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEngineErrorKind {
    /// A referenced record does not exist.
    NotFound,
    /// A policy predicate denied the action.
    Unauthorized,
    /// The state machine rejected the requested move.
    InvalidTransition,
    /// The dependency gate rejected completion.
    DependencyBlocked,
    /// A concurrent write won the race.
    Conflict,
    /// Input fields failed validation.
    Validation,
    /// An infrastructure collaborator failed.
    Internal,
}

/// Errors surfaced by the task mutation service.
///
/// Policy and transition failures are detected before any write; no partial
/// task mutation is ever persisted. Audit and notification failures never
/// appear here.
#[derive(Debug, Clone, Error)]
pub enum TaskEngineError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The referenced actor does not exist.
    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),

    /// The referenced category does not exist.
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// A prerequisite task record does not exist.
    #[error("dependency task not found: {0}")]
    DependencyNotFound(TaskId),

    /// A policy predicate denied the action.
    #[error("unauthorized: {0}")]
    Unauthorized(DenialReason),

    /// Domain validation or the state machine rejected the request.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Prerequisites are not all completed.
    #[error("task {task_id} is blocked by incomplete prerequisites")]
    DependencyBlocked {
        /// Task whose completion was rejected.
        task_id: TaskId,
        /// Prerequisites that are not completed.
        incomplete: Vec<TaskId>,
    },

    /// A concurrent mutation of the same task won the race.
    #[error("task {0} was modified concurrently, retry with fresh state")]
    Conflict(TaskId),

    /// An infrastructure collaborator failed.
    #[error("internal error: {0}")]
    Internal(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskEngineError {
    /// Wraps an infrastructure error.
    pub fn internal(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Internal(Arc::new(err))
    }

    /// Returns the coarse classification for transport mapping.
    #[must_use]
    pub const fn kind(&self) -> TaskEngineErrorKind {
        match self {
            Self::TaskNotFound(_)
            | Self::ActorNotFound(_)
            | Self::CategoryNotFound(_)
            | Self::DependencyNotFound(_) => TaskEngineErrorKind::NotFound,
            Self::Unauthorized(_) => TaskEngineErrorKind::Unauthorized,
            Self::Domain(domain) => match domain {
                TaskDomainError::InvalidStatusTransition { .. }
                | TaskDomainError::AcknowledgementRequired(_)
                | TaskDomainError::ReviewRequiresCompletion { .. } => {
                    TaskEngineErrorKind::InvalidTransition
                }
                _ => TaskEngineErrorKind::Validation,
            },
            Self::DependencyBlocked { .. } => TaskEngineErrorKind::DependencyBlocked,
            Self::Conflict(_) => TaskEngineErrorKind::Conflict,
            Self::Internal(_) => TaskEngineErrorKind::Internal,
        }
    }
}

impl From<TaskRepositoryError> for TaskEngineError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(task_id) => Self::TaskNotFound(task_id),
            TaskRepositoryError::StatusConflict { task_id, .. } => Self::Conflict(task_id),
            TaskRepositoryError::DependenciesIncomplete { task_id, incomplete } => {
                Self::DependencyBlocked { task_id, incomplete }
            }
            TaskRepositoryError::DuplicateTask(_) | TaskRepositoryError::Persistence(_) => {
                Self::internal(err)
            }
        }
    }
}

impl From<CategoryDirectoryError> for TaskEngineError {
    fn from(err: CategoryDirectoryError) -> Self {
        Self::internal(err)
    }
}
