//! `PostgreSQL` repository implementations for tasks and the audit trail.
//!
//! Commit guards run inside a transaction that locks the target row with
//! `FOR UPDATE`, so the guard check and the write are one atomic unit and a
//! lost race surfaces as a conflict instead of a silent overwrite.

use super::{
    models::{ActivityLogRow, TaskRow, entry_to_row, row_to_entry, row_to_task, task_to_row},
    schema::{activity_logs, tasks},
};
use crate::task::{
    domain::{ActivityLogEntry, Task, TaskId, TaskStatus},
    ports::{
        ActivityLog, ActivityLogError, ActivityLogResult, CommitGuard, TaskListFilter,
        TaskRepository, TaskRepositoryError, TaskRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

/// Evaluates a commit guard against the locked row's status and, for the
/// unblocked variant, the live dependency statuses.
fn enforce_guard(
    connection: &mut PgConnection,
    task_id: TaskId,
    dependencies: &[Uuid],
    actual: TaskStatus,
    guard: CommitGuard,
) -> TaskRepositoryResult<()> {
    let expected = match guard {
        CommitGuard::Exists => return Ok(()),
        CommitGuard::StatusEquals(expected) | CommitGuard::StatusEqualsUnblocked(expected) => {
            expected
        }
    };
    if actual != expected {
        return Err(TaskRepositoryError::StatusConflict {
            task_id,
            expected,
            actual,
        });
    }
    if matches!(guard, CommitGuard::StatusEqualsUnblocked(_)) && !dependencies.is_empty() {
        let completed: Vec<Uuid> = tasks::table
            .filter(tasks::id.eq_any(dependencies))
            .filter(tasks::status.eq(TaskStatus::Completed.as_str()))
            .select(tasks::id)
            .load(connection)?;
        // Missing dependency rows count as incomplete: a vanished
        // prerequisite must not unblock its dependents.
        let incomplete: Vec<TaskId> = dependencies
            .iter()
            .filter(|dep| !completed.contains(dep))
            .map(|dep| TaskId::from_uuid(*dep))
            .collect();
        if !incomplete.is_empty() {
            return Err(TaskRepositoryError::DependenciesIncomplete { task_id, incomplete });
        }
    }
    Ok(())
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
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task, guard: CommitGuard) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let dependencies: Vec<Uuid> = task.dependencies().iter().map(|id| id.into_inner()).collect();
        let row = task_to_row(task)?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|txn| {
                let stored_status: Option<String> = tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .select(tasks::status)
                    .for_update()
                    .first(txn)
                    .optional()?;
                let Some(stored_status) = stored_status else {
                    return Err(TaskRepositoryError::NotFound(task_id));
                };
                let actual = TaskStatus::try_from(stored_status.as_str())
                    .map_err(TaskRepositoryError::persistence)?;

                enforce_guard(txn, task_id, &dependencies, actual, guard)?;

                diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                    .set(&row)
                    .execute(txn)?;
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_all_by_ids(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows: Vec<TaskRow> = tasks::table
                .filter(tasks::id.eq_any(&uuids))
                .select(TaskRow::as_select())
                .load(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list(&self, filter: &TaskListFilter) -> TaskRepositoryResult<Vec<Task>> {
        let filter = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = tasks::table.select(TaskRow::as_select()).into_boxed();
            if !filter.includes_archived() {
                query = query.filter(tasks::archived_at.is_null());
            }
            if let Some(assignee) = filter.assignee() {
                query = query.filter(tasks::assigned_to.contains(vec![assignee.into_inner()]));
            }
            if let Some(status) = filter.status() {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(priority) = filter.priority() {
                query = query.filter(tasks::priority.eq(priority.as_str()));
            }
            if let Some(category) = filter.category() {
                query = query.filter(tasks::category.eq(category.into_inner()));
            }
            if let Some(due_after) = filter.due_after() {
                query = query.filter(tasks::due_date.ge(due_after));
            }
            if let Some(due_before) = filter.due_before() {
                query = query.filter(tasks::due_date.le(due_before));
            }

            let rows: Vec<TaskRow> = query.load(connection)?;
            let mut matching: Vec<Task> = rows
                .into_iter()
                .map(row_to_task)
                .collect::<TaskRepositoryResult<_>>()?;
            matching.sort_by(listing_order);
            Ok(matching)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let removed =
                diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                    .execute(connection)?;
            if removed == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

/// `PostgreSQL`-backed activity log.
#[derive(Debug, Clone)]
pub struct PostgresActivityLog {
    pool: TaskPgPool,
}

impl PostgresActivityLog {
    /// Creates a new activity log from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ActivityLogResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ActivityLogResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ActivityLogError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ActivityLogError::persistence)?
    }
}

#[async_trait]
impl ActivityLog for PostgresActivityLog {
    async fn append(&self, entry: &ActivityLogEntry) -> ActivityLogResult<()> {
        let row = entry_to_row(entry);
        self.run_blocking(move |connection| {
            diesel::insert_into(activity_logs::table)
                .values(&row)
                .execute(connection)
                .map_err(ActivityLogError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn entries_for_task(&self, task_id: TaskId) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        self.run_blocking(move |connection| {
            let rows: Vec<ActivityLogRow> = activity_logs::table
                .filter(activity_logs::entity_id.eq(task_id.into_inner()))
                .order(activity_logs::created_at.asc())
                .select(ActivityLogRow::as_select())
                .load(connection)
                .map_err(ActivityLogError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }
}
