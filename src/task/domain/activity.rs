//! Immutable activity audit entries.
//!
//! One entry is appended per accepted mutation, after the task write
//! commits. Entries are never updated or deleted, and a rejected attempt
//! never produces one.

use super::{ActivityLogId, ActorId, ParseActivityActionError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Mutation kinds recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    /// A task was deployed.
    TaskCreated,
    /// An assignee opened a pending task.
    TaskAcknowledged,
    /// An assignee finished a task.
    TaskCompleted,
    /// Task details or status were updated.
    TaskUpdated,
    /// A task was handed to new assignees.
    TaskReassigned,
    /// A reviewer confirmed a completed task.
    TaskApproved,
    /// A reviewer sent a completed task back.
    TaskRejected,
    /// A task was archived.
    TaskArchived,
    /// A task was purged from the registry.
    TaskDeleted,
    /// A task moved on the presentation board.
    TaskColumnMoved,
    /// A work interval was logged.
    TaskTimeLogged,
}

impl ActivityAction {
    /// Returns the canonical storage tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskCreated => "TASK_CREATED",
            Self::TaskAcknowledged => "TASK_ACKNOWLEDGED",
            Self::TaskCompleted => "TASK_COMPLETED",
            Self::TaskUpdated => "TASK_UPDATED",
            Self::TaskReassigned => "TASK_REASSIGNED",
            Self::TaskApproved => "TASK_APPROVED",
            Self::TaskRejected => "TASK_REJECTED",
            Self::TaskArchived => "TASK_ARCHIVED",
            Self::TaskDeleted => "TASK_DELETED",
            Self::TaskColumnMoved => "TASK_COLUMN_MOVED",
            Self::TaskTimeLogged => "TASK_TIME_LOGGED",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ActivityAction {
    type Error = ParseActivityActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "TASK_CREATED" => Ok(Self::TaskCreated),
            "TASK_ACKNOWLEDGED" => Ok(Self::TaskAcknowledged),
            "TASK_COMPLETED" => Ok(Self::TaskCompleted),
            "TASK_UPDATED" => Ok(Self::TaskUpdated),
            "TASK_REASSIGNED" => Ok(Self::TaskReassigned),
            "TASK_APPROVED" => Ok(Self::TaskApproved),
            "TASK_REJECTED" => Ok(Self::TaskRejected),
            "TASK_ARCHIVED" => Ok(Self::TaskArchived),
            "TASK_DELETED" => Ok(Self::TaskDeleted),
            "TASK_COLUMN_MOVED" => Ok(Self::TaskColumnMoved),
            "TASK_TIME_LOGGED" => Ok(Self::TaskTimeLogged),
            _ => Err(ParseActivityActionError(value.to_owned())),
        }
    }
}

/// Entity kinds the audit trail covers. Fixed to tasks in this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityEntity {
    /// A task record.
    Task,
}

impl ActivityEntity {
    /// Returns the canonical storage tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "TASK",
        }
    }
}

/// One immutable audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    id: ActivityLogId,
    actor: ActorId,
    action: ActivityAction,
    entity: ActivityEntity,
    entity_id: TaskId,
    metadata: Option<Value>,
    created_at: DateTime<Utc>,
}

impl ActivityLogEntry {
    /// Creates an audit entry for a task mutation.
    #[must_use]
    pub fn new(actor: ActorId, action: ActivityAction, task_id: TaskId, clock: &impl Clock) -> Self {
        Self {
            id: ActivityLogId::new(),
            actor,
            action,
            entity: ActivityEntity::Task,
            entity_id: task_id,
            metadata: None,
            created_at: clock.utc(),
        }
    }

    /// Attaches structured metadata to the entry.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: ActivityLogId,
        actor: ActorId,
        action: ActivityAction,
        entity_id: TaskId,
        metadata: Option<Value>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            actor,
            action,
            entity: ActivityEntity::Task,
            entity_id,
            metadata,
            created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityLogId {
        self.id
    }

    /// Returns the acting actor.
    #[must_use]
    pub const fn actor(&self) -> ActorId {
        self.actor
    }

    /// Returns the mutation kind.
    #[must_use]
    pub const fn action(&self) -> ActivityAction {
        self.action
    }

    /// Returns the entity kind.
    #[must_use]
    pub const fn entity(&self) -> ActivityEntity {
        self.entity
    }

    /// Returns the mutated task.
    #[must_use]
    pub const fn entity_id(&self) -> TaskId {
        self.entity_id
    }

    /// Returns the structured metadata, if any.
    #[must_use]
    pub const fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }

    /// Returns the creation instant.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
