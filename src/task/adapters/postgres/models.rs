//! Diesel row models and domain conversions for task persistence.

use super::schema::{activity_logs, tasks};
use crate::task::{
    domain::{
        ActivityAction, ActivityLogEntry, ActivityLogId, ActorId, AttachmentRef, CategoryId,
        PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus, TimeLog,
    },
    ports::{ActivityLogError, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

/// Row model for task records.
///
/// `treat_none_as_null` matters for the changeset: a rejected review must
/// write `completed_at = NULL`, not skip the column.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: Uuid,
    /// Task title.
    pub title: String,
    /// Optional briefing description.
    pub description: Option<String>,
    /// Category reference.
    pub category: Uuid,
    /// Assigned actor identifiers.
    pub assigned_to: Vec<Uuid>,
    /// Assigned team identifiers.
    pub assigned_teams: Vec<Uuid>,
    /// Urgency classification.
    pub priority: String,
    /// Lifecycle status.
    pub status: String,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional scheduled start.
    pub start_date: Option<DateTime<Utc>>,
    /// Acknowledgement instant.
    pub acknowledged_at: Option<DateTime<Utc>>,
    /// Completion instant.
    pub completed_at: Option<DateTime<Utc>>,
    /// Archival instant.
    pub archived_at: Option<DateTime<Utc>>,
    /// Actor who archived the task.
    pub archived_by: Option<Uuid>,
    /// Advisory parent task link.
    pub parent_task_id: Option<Uuid>,
    /// Prerequisite task identifiers.
    pub dependencies: Vec<Uuid>,
    /// Presentation board column.
    pub board_column: Option<String>,
    /// Presentation board ordering key.
    pub sort_order: Option<i32>,
    /// Attached file references.
    pub attachments: Value,
    /// Tracked work intervals.
    pub time_logs: Value,
    /// Effort estimate in minutes.
    pub estimated_minutes: Option<i32>,
    /// Deploying actor.
    pub created_by: Uuid,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last-update instant.
    pub updated_at: DateTime<Utc>,
}

/// Converts a domain task to its row representation.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the attachment or
/// time-log collections fail to serialize.
pub fn task_to_row(task: &Task) -> Result<TaskRow, TaskRepositoryError> {
    let attachments =
        serde_json::to_value(task.attachments()).map_err(TaskRepositoryError::persistence)?;
    let time_logs =
        serde_json::to_value(task.time_logs()).map_err(TaskRepositoryError::persistence)?;

    Ok(TaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        category: task.category().into_inner(),
        assigned_to: task.assigned_to().iter().map(|id| id.into_inner()).collect(),
        assigned_teams: task
            .assigned_teams()
            .iter()
            .map(|id| id.into_inner())
            .collect(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        due_date: task.due_date(),
        start_date: task.start_date(),
        acknowledged_at: task.acknowledged_at(),
        completed_at: task.completed_at(),
        archived_at: task.archived_at(),
        archived_by: task.archived_by().map(ActorId::into_inner),
        parent_task_id: task.parent_task_id().map(TaskId::into_inner),
        dependencies: task.dependencies().iter().map(|id| id.into_inner()).collect(),
        board_column: task.board_column().map(str::to_owned),
        sort_order: task.sort_order(),
        attachments,
        time_logs,
        estimated_minutes: task.estimated_minutes(),
        created_by: task.created_by().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

/// Reconstructs a domain task from its row representation.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when a stored enum tag or
/// JSON collection fails to parse.
pub fn row_to_task(row: TaskRow) -> Result<Task, TaskRepositoryError> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let attachments: Vec<AttachmentRef> =
        serde_json::from_value(row.attachments).map_err(TaskRepositoryError::persistence)?;
    let time_logs: Vec<TimeLog> =
        serde_json::from_value(row.time_logs).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        category: CategoryId::from_uuid(row.category),
        assigned_to: row.assigned_to.into_iter().map(ActorId::from_uuid).collect(),
        assigned_teams: row
            .assigned_teams
            .into_iter()
            .map(crate::task::domain::TeamId::from_uuid)
            .collect(),
        priority,
        status,
        due_date: row.due_date,
        start_date: row.start_date,
        acknowledged_at: row.acknowledged_at,
        completed_at: row.completed_at,
        archived_at: row.archived_at,
        archived_by: row.archived_by.map(ActorId::from_uuid),
        parent_task_id: row.parent_task_id.map(TaskId::from_uuid),
        dependencies: row.dependencies.into_iter().map(TaskId::from_uuid).collect(),
        board_column: row.board_column,
        sort_order: row.sort_order,
        attachments,
        time_logs,
        estimated_minutes: row.estimated_minutes,
        created_by: ActorId::from_uuid(row.created_by),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

/// Row model for activity log entries.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = activity_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityLogRow {
    /// Entry identifier.
    pub id: Uuid,
    /// Acting actor.
    pub actor: Uuid,
    /// Mutation kind tag.
    pub action: String,
    /// Audited entity kind.
    pub entity: String,
    /// Mutated entity identifier.
    pub entity_id: Uuid,
    /// Optional structured metadata.
    pub metadata: Option<Value>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// Converts an audit entry to its row representation.
#[must_use]
pub fn entry_to_row(entry: &ActivityLogEntry) -> ActivityLogRow {
    ActivityLogRow {
        id: entry.id().into_inner(),
        actor: entry.actor().into_inner(),
        action: entry.action().as_str().to_owned(),
        entity: entry.entity().as_str().to_owned(),
        entity_id: entry.entity_id().into_inner(),
        metadata: entry.metadata().cloned(),
        created_at: entry.created_at(),
    }
}

/// Reconstructs an audit entry from its row representation.
///
/// # Errors
///
/// Returns [`ActivityLogError::Persistence`] when the stored action tag
/// fails to parse.
pub fn row_to_entry(row: ActivityLogRow) -> Result<ActivityLogEntry, ActivityLogError> {
    let action =
        ActivityAction::try_from(row.action.as_str()).map_err(ActivityLogError::persistence)?;
    Ok(ActivityLogEntry::from_persisted(
        ActivityLogId::from_uuid(row.id),
        ActorId::from_uuid(row.actor),
        action,
        TaskId::from_uuid(row.entity_id),
        row.metadata,
        row.created_at,
    ))
}
