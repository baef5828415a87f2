//! Dependency gate: are a task's prerequisites all completed?

use super::{TaskEngineError, TaskEngineResult};
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::TaskRepository,
};
use std::sync::Arc;

/// Result of a dependency gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateStatus {
    /// Every prerequisite is completed (or there are none).
    Unblocked,
    /// The listed prerequisites are not yet completed.
    Blocked(Vec<TaskId>),
}

/// Reads prerequisite task statuses at decision time.
///
/// The gate never caches: dependency status can change between reads, so
/// every check re-reads, and the repository's commit guard re-validates the
/// same condition inside the atomic update to close the remaining window.
#[derive(Clone)]
pub struct DependencyGate<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> DependencyGate<R>
where
    R: TaskRepository,
{
    /// Creates a gate reading from the given repository.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Checks whether the task's prerequisite set is fully satisfied.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::DependencyNotFound`] when a prerequisite
    /// identifier resolves to no record, or an internal error when the read
    /// fails.
    pub async fn check(&self, task: &Task) -> TaskEngineResult<GateStatus> {
        let dependencies = task.dependencies();
        if dependencies.is_empty() {
            return Ok(GateStatus::Unblocked);
        }

        let records = self.repository.find_all_by_ids(dependencies).await?;
        for dependency in dependencies {
            if !records.iter().any(|record| record.id() == *dependency) {
                return Err(TaskEngineError::DependencyNotFound(*dependency));
            }
        }

        let incomplete: Vec<TaskId> = records
            .iter()
            .filter(|record| record.status() != TaskStatus::Completed)
            .map(Task::id)
            .collect();
        if incomplete.is_empty() {
            Ok(GateStatus::Unblocked)
        } else {
            Ok(GateStatus::Blocked(incomplete))
        }
    }
}
