//! In-memory task repository with atomic guard semantics.
//!
//! Guard evaluation and the row write happen under a single write lock, so
//! the adapter honours the same commit discipline as the `PostgreSQL`
//! implementation and is usable for concurrency-sensitive tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{
        CommitGuard, TaskListFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
    },
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn check_guard(
    tasks: &HashMap<TaskId, Task>,
    current: &Task,
    incoming: &Task,
    guard: CommitGuard,
) -> TaskRepositoryResult<()> {
    let expected = match guard {
        CommitGuard::Exists => return Ok(()),
        CommitGuard::StatusEquals(expected) | CommitGuard::StatusEqualsUnblocked(expected) => {
            expected
        }
    };
    if current.status() != expected {
        return Err(TaskRepositoryError::StatusConflict {
            task_id: current.id(),
            expected,
            actual: current.status(),
        });
    }
    if matches!(guard, CommitGuard::StatusEqualsUnblocked(_)) {
        // Missing dependency rows count as incomplete: a vanished
        // prerequisite must not unblock its dependents.
        let incomplete: Vec<TaskId> = incoming
            .dependencies()
            .iter()
            .copied()
            .filter(|dep| {
                tasks
                    .get(dep)
                    .is_none_or(|task| task.status() != TaskStatus::Completed)
            })
            .collect();
        if !incomplete.is_empty() {
            return Err(TaskRepositoryError::DependenciesIncomplete {
                task_id: current.id(),
                incomplete,
            });
        }
    }
    Ok(())
}

fn matches_filter(task: &Task, filter: &TaskListFilter) -> bool {
    if task.is_archived() && !filter.includes_archived() {
        return false;
    }
    if let Some(assignee) = filter.assignee()
        && !task.is_assignee(assignee)
    {
        return false;
    }
    if let Some(status) = filter.status()
        && task.status() != status
    {
        return false;
    }
    if let Some(priority) = filter.priority()
        && task.priority() != priority
    {
        return false;
    }
    if let Some(category) = filter.category()
        && task.category() != category
    {
        return false;
    }
    if let Some(due_after) = filter.due_after()
        && !task.due_date().is_some_and(|due| due >= due_after)
    {
        return false;
    }
    if let Some(due_before) = filter.due_before()
        && !task.due_date().is_some_and(|due| due <= due_before)
    {
        return false;
    }
    true
}

/// Orders by priority (most urgent first), then due date (earliest first,
/// unscheduled last), then creation time (newest first).
fn listing_order(a: &Task, b: &Task) -> std::cmp::Ordering {
    b.priority()
        .rank()
        .cmp(&a.priority().rank())
        .then_with(|| match (a.due_date(), b.due_date()) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        })
        .then_with(|| b.created_at().cmp(&a.created_at()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task, guard: CommitGuard) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        let current = tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        check_guard(&tasks, current, task, guard)?;
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(tasks.get(&id).cloned())
    }

    async fn find_all_by_ids(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(ids.iter().filter_map(|id| tasks.get(id).cloned()).collect())
    }

    async fn list(&self, filter: &TaskListFilter) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<Task> = tasks
            .values()
            .filter(|task| matches_filter(task, filter))
            .cloned()
            .collect();
        matching.sort_by(listing_order);
        Ok(matching)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }
}
