//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The requested lifecycle move is not permitted by the state machine.
    #[error("invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status the caller requested.
        to: TaskStatus,
    },

    /// Completion was requested before the briefing was acknowledged.
    #[error("task {0} must be acknowledged before completion")]
    AcknowledgementRequired(TaskId),

    /// A review decision was submitted for a task that is not completed.
    #[error("task {task_id} is {status}, only completed tasks can be reviewed")]
    ReviewRequiresCompletion {
        /// Task under review.
        task_id: TaskId,
        /// Status the task currently holds.
        status: TaskStatus,
    },

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the persisted column width.
    #[error("task title is {length} characters, maximum is {max}")]
    TitleTooLong {
        /// Character count of the offending title.
        length: usize,
        /// Maximum permitted character count.
        max: usize,
    },

    /// A task must carry at least one assignee.
    #[error("task assignment must name at least one actor")]
    EmptyAssignment,

    /// A task may not list itself as a dependency.
    #[error("task {0} cannot depend on itself")]
    SelfDependency(TaskId),

    /// A time log interval ends before it starts.
    #[error("time log ends before it starts")]
    TimeLogEndsBeforeStart,
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing actor roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown actor role: {0}")]
pub struct ParseActorRoleError(pub String);

/// Error returned while parsing activity action tags from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown activity action: {0}")]
pub struct ParseActivityActionError(pub String);
