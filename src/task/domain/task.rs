//! Task aggregate root and the lifecycle state machine.
//!
//! All status and timestamp writes go through aggregate methods; fields are
//! private so no caller outside this module can set `completed_at` or
//! `status` directly.

use super::{
    ActorId, CategoryId, ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError, TaskId,
    TeamId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum character count accepted for a task title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Deployed by an administrator; the assignee has not opened it yet.
    Pending,
    /// The assignee opened the task (read-receipt transition).
    Acknowledged,
    /// The assignee finished the work.
    Completed,
    /// Work is temporarily paused by an administrator.
    OnHold,
    /// Terminal; excluded from all active listings.
    Archived,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Acknowledged => "acknowledged",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
            Self::Archived => "archived",
        }
    }

    /// Returns whether transition to `target` is allowed.
    ///
    /// Administrative writes may park any non-archived task on hold or
    /// reset it towards pending; completion is reachable only from an
    /// acknowledged task and archival is terminal. Review approval (the
    /// idempotent confirm of [`Self::Completed`]) is a separate action and
    /// not part of this table.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Acknowledged | Self::OnHold | Self::Archived)
                | (
                    Self::Acknowledged,
                    Self::Completed | Self::OnHold | Self::Pending | Self::Archived
                )
                | (Self::OnHold, Self::Pending | Self::Acknowledged | Self::Archived)
                | (
                    Self::Completed,
                    Self::Acknowledged | Self::OnHold | Self::Pending | Self::Archived
                )
        )
    }

    /// Returns whether the status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "acknowledged" => Ok(Self::Acknowledged),
            "completed" => Ok(Self::Completed),
            "on_hold" => Ok(Self::OnHold),
            "archived" => Ok(Self::Archived),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task urgency classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Routine work.
    Low,
    /// Default urgency.
    Medium,
    /// Elevated urgency.
    High,
    /// Drop-everything urgency.
    Urgent,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Returns a sort rank; higher means more urgent.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Urgent => 3,
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Opaque reference to an uploaded file.
///
/// Signing and storage belong to the file-storage collaborator; the engine
/// only carries the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    /// Storage locator for the file.
    pub url: String,
    /// Original file name.
    pub file_name: String,
    /// MIME type reported at upload.
    pub file_type: String,
    /// File size in bytes.
    pub size: u64,
    /// Actor who uploaded the file.
    pub uploaded_by: ActorId,
    /// Upload instant.
    pub uploaded_at: DateTime<Utc>,
}

/// One tracked work interval on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLog {
    actor: ActorId,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    duration_minutes: Option<i32>,
}

impl TimeLog {
    /// Creates a validated time log entry.
    ///
    /// When `ended_at` is present and `duration_minutes` is not, the duration
    /// is derived from the interval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TimeLogEndsBeforeStart`] when the interval
    /// is negative.
    pub fn new(
        actor: ActorId,
        started_at: DateTime<Utc>,
        ended_at: Option<DateTime<Utc>>,
        duration_minutes: Option<i32>,
    ) -> Result<Self, TaskDomainError> {
        if let Some(end) = ended_at
            && end < started_at
        {
            return Err(TaskDomainError::TimeLogEndsBeforeStart);
        }
        let derived = duration_minutes.or_else(|| {
            ended_at.and_then(|end| {
                i32::try_from(end.signed_duration_since(started_at).num_minutes()).ok()
            })
        });
        Ok(Self {
            actor,
            started_at,
            ended_at,
            duration_minutes: derived,
        })
    }

    /// Returns the actor who logged the interval.
    #[must_use]
    pub const fn actor(&self) -> ActorId {
        self.actor
    }

    /// Returns the interval start.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns the interval end, if closed.
    #[must_use]
    pub const fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Returns the logged or derived duration in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> Option<i32> {
        self.duration_minutes
    }
}

/// Validated input for deploying a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
    category: CategoryId,
    assigned_to: Vec<ActorId>,
    assigned_teams: Vec<TeamId>,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
    start_date: Option<DateTime<Utc>>,
    dependencies: Vec<TaskId>,
    parent_task_id: Option<TaskId>,
    estimated_minutes: Option<i32>,
    attachments: Vec<AttachmentRef>,
}

impl TaskDraft {
    /// Creates a draft with the required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        category: CategoryId,
        assigned_to: impl IntoIterator<Item = ActorId>,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            category,
            assigned_to: assigned_to.into_iter().collect(),
            assigned_teams: Vec::new(),
            priority: TaskPriority::default(),
            due_date: None,
            start_date: None,
            dependencies: Vec::new(),
            parent_task_id: None,
            estimated_minutes: None,
            attachments: Vec::new(),
        }
    }

    /// Sets the briefing description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets team-level assignment.
    #[must_use]
    pub fn with_teams(mut self, teams: impl IntoIterator<Item = TeamId>) -> Self {
        self.assigned_teams = teams.into_iter().collect();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the scheduled start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets prerequisite tasks that must complete first.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = TaskId>) -> Self {
        self.dependencies = dependencies.into_iter().collect();
        self
    }

    /// Sets the advisory parent task link.
    #[must_use]
    pub const fn with_parent(mut self, parent_task_id: TaskId) -> Self {
        self.parent_task_id = Some(parent_task_id);
        self
    }

    /// Sets the effort estimate in minutes.
    #[must_use]
    pub const fn with_estimate(mut self, estimated_minutes: i32) -> Self {
        self.estimated_minutes = Some(estimated_minutes);
        self
    }

    /// Attaches uploaded file references.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = AttachmentRef>) -> Self {
        self.attachments = attachments.into_iter().collect();
        self
    }
}

/// Partial update applied to task details by [`Task::apply_update`].
///
/// `None` fields are left unchanged. Status changes are not part of this
/// type; the mutation service routes them through the dedicated lifecycle
/// methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Replacement category.
    pub category: Option<CategoryId>,
    /// Replacement due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Replacement start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Replacement effort estimate in minutes.
    pub estimated_minutes: Option<i32>,
    /// Replacement prerequisite set.
    pub dependencies: Option<Vec<TaskId>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted category reference.
    pub category: CategoryId,
    /// Persisted assignees.
    pub assigned_to: Vec<ActorId>,
    /// Persisted team assignment.
    pub assigned_teams: Vec<TeamId>,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Persisted acknowledgement instant.
    pub acknowledged_at: Option<DateTime<Utc>>,
    /// Persisted completion instant.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted archival instant.
    pub archived_at: Option<DateTime<Utc>>,
    /// Persisted archiving actor.
    pub archived_by: Option<ActorId>,
    /// Persisted parent task link.
    pub parent_task_id: Option<TaskId>,
    /// Persisted prerequisite set.
    pub dependencies: Vec<TaskId>,
    /// Persisted board column.
    pub board_column: Option<String>,
    /// Persisted board ordering key.
    pub sort_order: Option<i32>,
    /// Persisted attachments.
    pub attachments: Vec<AttachmentRef>,
    /// Persisted time logs.
    pub time_logs: Vec<TimeLog>,
    /// Persisted effort estimate.
    pub estimated_minutes: Option<i32>,
    /// Persisted creator.
    pub created_by: ActorId,
    /// Persisted creation instant.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update instant.
    pub updated_at: DateTime<Utc>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    category: CategoryId,
    assigned_to: Vec<ActorId>,
    assigned_teams: Vec<TeamId>,
    priority: TaskPriority,
    status: TaskStatus,
    due_date: Option<DateTime<Utc>>,
    start_date: Option<DateTime<Utc>>,
    acknowledged_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    archived_at: Option<DateTime<Utc>>,
    archived_by: Option<ActorId>,
    parent_task_id: Option<TaskId>,
    dependencies: Vec<TaskId>,
    board_column: Option<String>,
    sort_order: Option<i32>,
    attachments: Vec<AttachmentRef>,
    time_logs: Vec<TimeLog>,
    estimated_minutes: Option<i32>,
    created_by: ActorId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Deploys a new task in [`TaskStatus::Pending`].
    ///
    /// # Errors
    ///
    /// Returns a [`TaskDomainError`] when the title is empty or too long, or
    /// when the draft names no assignees.
    pub fn deploy(
        draft: TaskDraft,
        created_by: ActorId,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let title = validated_title(&draft.title)?;
        let assigned_to = dedup(draft.assigned_to);
        if assigned_to.is_empty() {
            return Err(TaskDomainError::EmptyAssignment);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title,
            description: draft.description,
            category: draft.category,
            assigned_to,
            assigned_teams: dedup(draft.assigned_teams),
            priority: draft.priority,
            status: TaskStatus::Pending,
            due_date: draft.due_date,
            start_date: draft.start_date,
            acknowledged_at: None,
            completed_at: None,
            archived_at: None,
            archived_by: None,
            parent_task_id: draft.parent_task_id,
            dependencies: dedup(draft.dependencies),
            board_column: None,
            sort_order: None,
            attachments: draft.attachments,
            time_logs: Vec::new(),
            estimated_minutes: draft.estimated_minutes,
            created_by,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            category: data.category,
            assigned_to: data.assigned_to,
            assigned_teams: data.assigned_teams,
            priority: data.priority,
            status: data.status,
            due_date: data.due_date,
            start_date: data.start_date,
            acknowledged_at: data.acknowledged_at,
            completed_at: data.completed_at,
            archived_at: data.archived_at,
            archived_by: data.archived_by,
            parent_task_id: data.parent_task_id,
            dependencies: data.dependencies,
            board_column: data.board_column,
            sort_order: data.sort_order,
            attachments: data.attachments,
            time_logs: data.time_logs,
            estimated_minutes: data.estimated_minutes,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Marks the briefing as read by its assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] unless the task
    /// is [`TaskStatus::Pending`].
    pub fn acknowledge(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::Pending {
            return Err(self.transition_error(TaskStatus::Acknowledged));
        }
        self.status = TaskStatus::Acknowledged;
        self.acknowledged_at = Some(clock.utc());
        self.touch(clock);
        Ok(())
    }

    /// Marks the task as finished by its assignee.
    ///
    /// The dependency gate is enforced by the mutation service and re-checked
    /// by the repository's commit guard; this method only enforces the
    /// status machine.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AcknowledgementRequired`] when the task is
    /// still [`TaskStatus::Pending`], or
    /// [`TaskDomainError::InvalidStatusTransition`] from any status other
    /// than [`TaskStatus::Acknowledged`].
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        match self.status {
            TaskStatus::Pending => Err(TaskDomainError::AcknowledgementRequired(self.id)),
            TaskStatus::Acknowledged => {
                self.status = TaskStatus::Completed;
                self.completed_at = Some(clock.utc());
                self.touch(clock);
                Ok(())
            }
            _ => Err(self.transition_error(TaskStatus::Completed)),
        }
    }

    /// Applies an administrative status write.
    ///
    /// Only [`TaskStatus::Pending`], [`TaskStatus::Acknowledged`], and
    /// [`TaskStatus::OnHold`] are reachable here; completion and archival
    /// have dedicated, separately-guarded paths.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the move is
    /// not permitted by the status machine.
    pub fn set_status(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let admin_writable = matches!(
            target,
            TaskStatus::Pending | TaskStatus::Acknowledged | TaskStatus::OnHold
        );
        if !admin_writable || !self.status.can_transition_to(target) {
            return Err(self.transition_error(target));
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Archives the task, removing it from active listings.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the task is
    /// already archived.
    pub fn archive(&mut self, archived_by: ActorId, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.is_archived() {
            return Err(self.transition_error(TaskStatus::Archived));
        }
        self.status = TaskStatus::Archived;
        self.archived_at = Some(clock.utc());
        self.archived_by = Some(archived_by);
        self.touch(clock);
        Ok(())
    }

    /// Reassigns the task and resets it to [`TaskStatus::Pending`] so the
    /// new assignees must re-acknowledge.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] for archived
    /// tasks and [`TaskDomainError::EmptyAssignment`] when no assignees are
    /// given.
    pub fn reassign(
        &mut self,
        assigned_to: impl IntoIterator<Item = ActorId>,
        assigned_teams: impl IntoIterator<Item = TeamId>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.is_archived() {
            return Err(self.transition_error(TaskStatus::Pending));
        }
        let assignees = dedup(assigned_to.into_iter().collect());
        if assignees.is_empty() {
            return Err(TaskDomainError::EmptyAssignment);
        }
        self.assigned_to = assignees;
        self.assigned_teams = dedup(assigned_teams.into_iter().collect());
        self.status = TaskStatus::Pending;
        self.acknowledged_at = None;
        self.completed_at = None;
        self.touch(clock);
        Ok(())
    }

    /// Confirms a completed task after review. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ReviewRequiresCompletion`] unless the task
    /// is [`TaskStatus::Completed`].
    pub fn approve_review(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.require_completed_for_review()?;
        if self.completed_at.is_none() {
            self.completed_at = Some(clock.utc());
        }
        self.touch(clock);
        Ok(())
    }

    /// Sends a completed task back to its assignee after review.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ReviewRequiresCompletion`] unless the task
    /// is [`TaskStatus::Completed`].
    pub fn reject_review(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.require_completed_for_review()?;
        self.status = TaskStatus::Acknowledged;
        self.completed_at = None;
        self.touch(clock);
        Ok(())
    }

    /// Moves the task on the presentation board.
    ///
    /// Board placement bypasses the status machine entirely.
    pub fn move_to_column(
        &mut self,
        column: impl Into<String>,
        sort_order: Option<i32>,
        clock: &impl Clock,
    ) {
        self.board_column = Some(column.into());
        if sort_order.is_some() {
            self.sort_order = sort_order;
        }
        self.touch(clock);
    }

    /// Appends a tracked work interval. Time logs are append-only.
    pub fn log_time(&mut self, entry: TimeLog, clock: &impl Clock) {
        self.time_logs.push(entry);
        self.touch(clock);
    }

    /// Applies a partial details update.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskDomainError`] when a replacement title fails
    /// validation or the replacement prerequisite set names the task itself.
    pub fn apply_update(
        &mut self,
        update: TaskUpdate,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if let Some(title) = update.title {
            self.title = validated_title(&title)?;
        }
        if let Some(dependencies) = update.dependencies {
            let deduped = dedup(dependencies);
            if deduped.contains(&self.id) {
                return Err(TaskDomainError::SelfDependency(self.id));
            }
            self.dependencies = deduped;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(start_date) = update.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(estimated_minutes) = update.estimated_minutes {
            self.estimated_minutes = Some(estimated_minutes);
        }
        self.touch(clock);
        Ok(())
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the briefing description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the category reference.
    #[must_use]
    pub const fn category(&self) -> CategoryId {
        self.category
    }

    /// Returns the assigned actors, in assignment order.
    #[must_use]
    pub fn assigned_to(&self) -> &[ActorId] {
        &self.assigned_to
    }

    /// Returns the assigned teams.
    #[must_use]
    pub fn assigned_teams(&self) -> &[TeamId] {
        &self.assigned_teams
    }

    /// Returns whether the actor is one of the assignees.
    #[must_use]
    pub fn is_assignee(&self, actor: ActorId) -> bool {
        self.assigned_to.contains(&actor)
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due date, if scheduled.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the start date, if scheduled.
    #[must_use]
    pub const fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    /// Returns the acknowledgement instant, if acknowledged.
    #[must_use]
    pub const fn acknowledged_at(&self) -> Option<DateTime<Utc>> {
        self.acknowledged_at
    }

    /// Returns the completion instant, if completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the archival instant, if archived.
    #[must_use]
    pub const fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.archived_at
    }

    /// Returns the actor who archived the task, if archived.
    #[must_use]
    pub const fn archived_by(&self) -> Option<ActorId> {
        self.archived_by
    }

    /// Returns whether the task has been archived.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    /// Returns the advisory parent task link.
    #[must_use]
    pub const fn parent_task_id(&self) -> Option<TaskId> {
        self.parent_task_id
    }

    /// Returns the prerequisite tasks.
    #[must_use]
    pub fn dependencies(&self) -> &[TaskId] {
        &self.dependencies
    }

    /// Returns the board column, if placed.
    #[must_use]
    pub fn board_column(&self) -> Option<&str> {
        self.board_column.as_deref()
    }

    /// Returns the board ordering key, if placed.
    #[must_use]
    pub const fn sort_order(&self) -> Option<i32> {
        self.sort_order
    }

    /// Returns the attached file references.
    #[must_use]
    pub fn attachments(&self) -> &[AttachmentRef] {
        &self.attachments
    }

    /// Returns the tracked work intervals.
    #[must_use]
    pub fn time_logs(&self) -> &[TimeLog] {
        &self.time_logs
    }

    /// Returns the effort estimate in minutes.
    #[must_use]
    pub const fn estimated_minutes(&self) -> Option<i32> {
        self.estimated_minutes
    }

    /// Returns the deploying actor.
    #[must_use]
    pub const fn created_by(&self) -> ActorId {
        self.created_by
    }

    /// Returns the creation instant.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update instant.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn require_completed_for_review(&self) -> Result<(), TaskDomainError> {
        if self.status == TaskStatus::Completed {
            return Ok(());
        }
        Err(TaskDomainError::ReviewRequiresCompletion {
            task_id: self.id,
            status: self.status,
        })
    }

    const fn transition_error(&self, to: TaskStatus) -> TaskDomainError {
        TaskDomainError::InvalidStatusTransition {
            task_id: self.id,
            from: self.status,
            to,
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validated_title(raw: &str) -> Result<String, TaskDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    let length = trimmed.chars().count();
    if length > MAX_TITLE_LENGTH {
        return Err(TaskDomainError::TitleTooLong {
            length,
            max: MAX_TITLE_LENGTH,
        });
    }
    Ok(trimmed.to_owned())
}

/// Removes duplicates while preserving first-seen order.
fn dedup<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
