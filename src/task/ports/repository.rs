//! Repository port for task persistence with guarded conditional commits.

use crate::task::domain::{ActorId, CategoryId, Task, TaskId, TaskPriority, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Commit-time precondition for [`TaskRepository::update`].
///
/// Concurrent requests against the same task are serialized by the storage
/// layer; a guard expresses what must still hold inside that atomic update.
/// A failed guard surfaces as [`TaskRepositoryError::StatusConflict`] or
/// [`TaskRepositoryError::DependenciesIncomplete`], never as a silent retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitGuard {
    /// The task must merely exist.
    Exists,
    /// The stored status must equal the given status at commit time.
    StatusEquals(TaskStatus),
    /// The stored status must equal the given status and every dependency
    /// must be completed at commit time. Used by the completion path to
    /// close the gate-check race window.
    StatusEqualsUnblocked(TaskStatus),
}

/// Filter for task listings.
///
/// Archived tasks are excluded unless [`Self::with_archived`] is set,
/// regardless of any status filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListFilter {
    assignee: Option<ActorId>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    category: Option<CategoryId>,
    due_after: Option<DateTime<Utc>>,
    due_before: Option<DateTime<Utc>>,
    include_archived: bool,
}

impl TaskListFilter {
    /// Creates an empty filter matching all active tasks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to tasks assigned to the given actor.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: ActorId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Restricts to tasks in the given status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to tasks with the given priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts to tasks in the given category.
    #[must_use]
    pub const fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts to tasks due at or after the given instant.
    #[must_use]
    pub const fn with_due_after(mut self, due_after: DateTime<Utc>) -> Self {
        self.due_after = Some(due_after);
        self
    }

    /// Restricts to tasks due at or before the given instant.
    #[must_use]
    pub const fn with_due_before(mut self, due_before: DateTime<Utc>) -> Self {
        self.due_before = Some(due_before);
        self
    }

    /// Includes archived tasks in the listing.
    #[must_use]
    pub const fn with_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }

    /// Returns the assignee restriction.
    #[must_use]
    pub const fn assignee(&self) -> Option<ActorId> {
        self.assignee
    }

    /// Returns the status restriction.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the priority restriction.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the category restriction.
    #[must_use]
    pub const fn category(&self) -> Option<CategoryId> {
        self.category
    }

    /// Returns the lower due-date bound.
    #[must_use]
    pub const fn due_after(&self) -> Option<DateTime<Utc>> {
        self.due_after
    }

    /// Returns the upper due-date bound.
    #[must_use]
    pub const fn due_before(&self) -> Option<DateTime<Utc>> {
        self.due_before
    }

    /// Returns whether archived tasks are included.
    #[must_use]
    pub const fn includes_archived(&self) -> bool {
        self.include_archived
    }
}

/// Task persistence contract.
///
/// Implementations must apply each [`CommitGuard`] atomically with the
/// write: the guard check and the row update happen in one storage-level
/// unit so two racing mutations cannot both pass.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a newly deployed task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the identifier
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task under the given guard.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, [`TaskRepositoryError::StatusConflict`] when the stored status
    /// no longer matches the guard, and
    /// [`TaskRepositoryError::DependenciesIncomplete`] when an unblocked
    /// guard finds open prerequisites at commit time.
    async fn update(&self, task: &Task, guard: CommitGuard) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Loads the given tasks, skipping identifiers that do not resolve.
    ///
    /// Used by the dependency gate; the caller decides whether a missing
    /// record is an error.
    async fn find_all_by_ids(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>>;

    /// Lists tasks matching the filter, ordered by priority (most urgent
    /// first) and then due date (earliest first).
    async fn list(&self, filter: &TaskListFilter) -> TaskRepositoryResult<Vec<Task>>;

    /// Permanently removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A conditional update found a different status than the guard
    /// expected; the caller lost a concurrent race.
    #[error("task {task_id} status changed concurrently: expected {expected}, found {actual}")]
    StatusConflict {
        /// Task whose update was rejected.
        task_id: TaskId,
        /// Status the guard expected.
        expected: TaskStatus,
        /// Status found at commit time.
        actual: TaskStatus,
    },

    /// An unblocked guard found open prerequisites at commit time.
    #[error("task {task_id} has incomplete dependencies")]
    DependenciesIncomplete {
        /// Task whose completion was rejected.
        task_id: TaskId,
        /// Prerequisites that are not completed.
        incomplete: Vec<TaskId>,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
