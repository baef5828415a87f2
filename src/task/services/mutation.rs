//! Task mutation service: the single write path for task state.
//!
//! Every operation follows the same discipline: validate policy, validate
//! the lifecycle transition, validate dependencies, commit under a guard,
//! then audit and notify. Policy and transition failures are detected
//! before any write, so no partial mutation is ever persisted; audit and
//! notification failures are logged and never unwind the commit.

use super::{
    ChangeNotificationDispatcher, DependencyGate, GateStatus, TaskEngineError, TaskEngineResult,
};
use crate::task::{
    domain::{
        ActivityAction, ActivityLogEntry, Actor, ActorId, PolicyDecision, Task, TaskDraft, TaskId,
        TaskPolicy, TaskProjection, TaskStatus, TaskUpdate, TeamId, TimeLog,
    },
    ports::{
        ActivityLog, ActorDirectory, CategoryDirectory, CommitGuard, Mailer, RealtimePublisher,
        TaskListFilter, TaskRepository, TaskRepositoryError,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;

/// Reviewer verdict on a completed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Confirm completion. Idempotent.
    Approve,
    /// Send the task back to its assignee.
    Reject,
}

/// Caller-supplied fields for [`TaskMutationService::update_task`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    /// Requested status write. `Completed` follows the completion protocol
    /// (acknowledgement and dependency gate); other values are
    /// administrative moves.
    pub status: Option<TaskStatus>,
    /// Board column write bundled with the update.
    pub board_column: Option<String>,
    /// Detail field changes.
    pub details: TaskUpdate,
}

/// Caller-supplied fields for a new time log interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewTimeLog {
    /// Interval start.
    pub started_at: DateTime<Utc>,
    /// Interval end, if already closed.
    pub ended_at: Option<DateTime<Utc>>,
    /// Explicit duration override in minutes.
    pub duration_minutes: Option<i32>,
}

/// Orchestrates validated, audited, and notified task mutations.
#[derive(Clone)]
pub struct TaskMutationService<R, A, G, L, M, P, C>
where
    R: TaskRepository,
    A: ActorDirectory,
    G: CategoryDirectory,
    L: ActivityLog,
    M: Mailer,
    P: RealtimePublisher,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    actors: Arc<A>,
    categories: Arc<G>,
    activity: Arc<L>,
    gate: DependencyGate<R>,
    notifier: ChangeNotificationDispatcher<M, P>,
    clock: Arc<C>,
}

impl<R, A, G, L, M, P, C> TaskMutationService<R, A, G, L, M, P, C>
where
    R: TaskRepository,
    A: ActorDirectory,
    G: CategoryDirectory,
    L: ActivityLog,
    M: Mailer,
    P: RealtimePublisher,
    C: Clock + Send + Sync,
{
    /// Creates a mutation service.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        actors: Arc<A>,
        categories: Arc<G>,
        activity: Arc<L>,
        notifier: ChangeNotificationDispatcher<M, P>,
        clock: Arc<C>,
    ) -> Self {
        let gate = DependencyGate::new(Arc::clone(&repository));
        Self {
            repository,
            actors,
            categories,
            activity,
            gate,
            notifier,
            clock,
        }
    }

    /// Lists tasks visible to the actor.
    ///
    /// Non-administrators only ever see their own assignments; any
    /// caller-supplied assignee filter is overridden for them. Archived
    /// tasks are excluded unless the filter requests them.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::Unauthorized`] for inactive actors.
    pub async fn list_tasks(
        &self,
        actor: &Actor,
        filter: TaskListFilter,
    ) -> TaskEngineResult<Vec<TaskProjection>> {
        require(active_only(actor))?;
        let effective = if actor.role().is_admin() {
            filter
        } else {
            filter.with_assignee(actor.id())
        };

        let tasks = self.repository.list(&effective).await?;
        let mut projections = Vec::with_capacity(tasks.len());
        for task in tasks {
            projections.push(self.project(task).await);
        }
        Ok(projections)
    }

    /// Fetches a single task, auto-acknowledging on an assignee's first
    /// read of a pending task.
    ///
    /// Auto-acknowledgement is a first-class mutation: it commits under a
    /// status guard, so two racing first-reads produce exactly one audit
    /// entry and one notification pair. The loser of the race re-reads and
    /// returns the already-acknowledged task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::TaskNotFound`] or
    /// [`TaskEngineError::Unauthorized`].
    pub async fn get_task(&self, actor: &Actor, id: TaskId) -> TaskEngineResult<TaskProjection> {
        let mut task = self.load(id).await?;
        require(TaskPolicy::can_view(actor, &task))?;

        if task.status() == TaskStatus::Pending && task.is_assignee(actor.id()) {
            task.acknowledge(&*self.clock)?;
            match self
                .repository
                .update(&task, CommitGuard::StatusEquals(TaskStatus::Pending))
                .await
            {
                Ok(()) => {
                    self.record(
                        actor.id(),
                        ActivityAction::TaskAcknowledged,
                        id,
                        Some(json!({ "auto": true })),
                    )
                    .await;
                    let projection = self.project(task.clone()).await;
                    self.notifier.task_changed(&projection).await;
                    let creator = self.resolve_actor(task.created_by()).await;
                    self.notifier
                        .task_acknowledged(&task, actor, creator.as_ref())
                        .await;
                    return Ok(projection);
                }
                Err(TaskRepositoryError::StatusConflict { .. }) => {
                    // Another request acknowledged first; serve the stored
                    // state without a second audit entry or mail pair.
                    task = self.load(id).await?;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(self.project(task).await)
    }

    /// Deploys a new task in [`TaskStatus::Pending`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::Unauthorized`] for non-administrators,
    /// [`TaskEngineError::CategoryNotFound`] for a dangling category
    /// reference, or a validation error from the draft fields.
    pub async fn deploy_task(
        &self,
        actor: &Actor,
        draft: TaskDraft,
    ) -> TaskEngineResult<TaskProjection> {
        require(TaskPolicy::can_deploy(actor))?;

        let task = Task::deploy(draft, actor.id(), &*self.clock)?;
        if self.categories.find_by_id(task.category()).await?.is_none() {
            return Err(TaskEngineError::CategoryNotFound(task.category()));
        }

        self.repository.store(&task).await?;
        self.record(actor.id(), ActivityAction::TaskCreated, task.id(), None)
            .await;

        let projection = self.project(task.clone()).await;
        self.notifier.task_changed(&projection).await;
        let assignees = self.resolve_actors(task.assigned_to()).await;
        self.notifier
            .task_assigned(&task, &assignees, actor.name())
            .await;
        Ok(projection)
    }

    /// Updates task details, optionally moving status.
    ///
    /// A requested move to [`TaskStatus::Completed`] follows the full
    /// completion protocol (assignee policy, acknowledgement requirement,
    /// dependency gate); other status values are administrative writes.
    ///
    /// # Errors
    ///
    /// Returns the taxonomy errors: unauthorized, invalid transition,
    /// dependency blocked, conflict, or validation.
    pub async fn update_task(
        &self,
        actor: &Actor,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskEngineResult<TaskProjection> {
        let mut task = self.load(id).await?;
        require(TaskPolicy::can_update(actor, &task))?;

        let loaded_status = task.status();
        let mut action = ActivityAction::TaskUpdated;
        let mut completed = false;

        if let Some(target) = request.status {
            if target == TaskStatus::Completed {
                require(TaskPolicy::can_complete(actor, &task))?;
                task.complete(&*self.clock)?;
                if let GateStatus::Blocked(incomplete) = self.gate.check(&task).await? {
                    return Err(TaskEngineError::DependencyBlocked {
                        task_id: id,
                        incomplete,
                    });
                }
                action = ActivityAction::TaskCompleted;
                completed = true;
            } else if target != loaded_status {
                task.set_status(target, &*self.clock)?;
            }
        }
        if let Some(column) = request.board_column {
            task.move_to_column(column, None, &*self.clock);
        }
        task.apply_update(request.details, &*self.clock)?;

        let guard = if completed {
            CommitGuard::StatusEqualsUnblocked(TaskStatus::Acknowledged)
        } else {
            CommitGuard::StatusEquals(loaded_status)
        };
        self.repository.update(&task, guard).await?;
        self.record(actor.id(), action, id, None).await;

        let projection = self.project(task.clone()).await;
        self.notifier.task_changed(&projection).await;
        if completed {
            let creator = self.resolve_actor(task.created_by()).await;
            self.notifier
                .task_completed(&task, actor, creator.as_ref())
                .await;
        }
        Ok(projection)
    }

    /// Completes a task as its assignee.
    ///
    /// The dependency gate is checked here and re-validated inside the
    /// atomic commit, so a prerequisite un-completing between read and
    /// write still rejects the mutation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::Unauthorized`] for non-assignees, an
    /// acknowledgement-required transition error for pending tasks,
    /// [`TaskEngineError::DependencyBlocked`] while prerequisites are open,
    /// and [`TaskEngineError::Conflict`] when a concurrent write wins.
    pub async fn complete_task(&self, actor: &Actor, id: TaskId) -> TaskEngineResult<TaskProjection> {
        let mut task = self.load(id).await?;
        require(TaskPolicy::can_complete(actor, &task))?;

        task.complete(&*self.clock)?;
        if let GateStatus::Blocked(incomplete) = self.gate.check(&task).await? {
            return Err(TaskEngineError::DependencyBlocked {
                task_id: id,
                incomplete,
            });
        }

        self.repository
            .update(&task, CommitGuard::StatusEqualsUnblocked(TaskStatus::Acknowledged))
            .await?;
        self.record(actor.id(), ActivityAction::TaskCompleted, id, None)
            .await;

        let projection = self.project(task.clone()).await;
        self.notifier.task_changed(&projection).await;
        let creator = self.resolve_actor(task.created_by()).await;
        self.notifier
            .task_completed(&task, actor, creator.as_ref())
            .await;
        Ok(projection)
    }

    /// Hands the task to new assignees and resets it to
    /// [`TaskStatus::Pending`], clearing acknowledgement and completion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::Unauthorized`] for non-administrators and
    /// an invalid-transition error for archived tasks.
    pub async fn reassign_task(
        &self,
        actor: &Actor,
        id: TaskId,
        assigned_to: Vec<ActorId>,
        assigned_teams: Vec<TeamId>,
    ) -> TaskEngineResult<TaskProjection> {
        require(TaskPolicy::can_reassign(actor))?;
        let mut task = self.load(id).await?;

        let loaded_status = task.status();
        task.reassign(assigned_to, assigned_teams, &*self.clock)?;

        self.repository
            .update(&task, CommitGuard::StatusEquals(loaded_status))
            .await?;
        self.record(actor.id(), ActivityAction::TaskReassigned, id, None)
            .await;

        let projection = self.project(task.clone()).await;
        self.notifier.task_changed(&projection).await;
        let assignees = self.resolve_actors(task.assigned_to()).await;
        self.notifier
            .task_assigned(&task, &assignees, actor.name())
            .await;
        Ok(projection)
    }

    /// Records a reviewer verdict on a completed task.
    ///
    /// Approval confirms `completed_at` and is idempotent; rejection sends
    /// the task back to [`TaskStatus::Acknowledged`] and clears
    /// `completed_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::Unauthorized`] for non-administrators and
    /// an invalid-transition error for tasks that are not completed.
    pub async fn review_task(
        &self,
        actor: &Actor,
        id: TaskId,
        decision: ReviewDecision,
        feedback: Option<String>,
    ) -> TaskEngineResult<TaskProjection> {
        require(TaskPolicy::can_review(actor))?;
        let mut task = self.load(id).await?;

        let action = match decision {
            ReviewDecision::Approve => {
                task.approve_review(&*self.clock)?;
                ActivityAction::TaskApproved
            }
            ReviewDecision::Reject => {
                task.reject_review(&*self.clock)?;
                ActivityAction::TaskRejected
            }
        };

        self.repository
            .update(&task, CommitGuard::StatusEquals(TaskStatus::Completed))
            .await?;
        self.record(actor.id(), action, id, Some(json!({ "feedback": feedback })))
            .await;

        let projection = self.project(task.clone()).await;
        self.notifier.task_changed(&projection).await;
        Ok(projection)
    }

    /// Archives a task, removing it from active listings.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::Unauthorized`] unless the actor is the
    /// super administrator.
    pub async fn archive_task(&self, actor: &Actor, id: TaskId) -> TaskEngineResult<TaskProjection> {
        require(TaskPolicy::can_archive(actor))?;
        let mut task = self.load(id).await?;

        let loaded_status = task.status();
        task.archive(actor.id(), &*self.clock)?;

        self.repository
            .update(&task, CommitGuard::StatusEquals(loaded_status))
            .await?;
        self.record(actor.id(), ActivityAction::TaskArchived, id, None)
            .await;

        let projection = self.project(task.clone()).await;
        self.notifier.task_changed(&projection).await;
        Ok(projection)
    }

    /// Permanently purges a task from the registry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::Unauthorized`] unless the actor is the
    /// super administrator, or [`TaskEngineError::TaskNotFound`].
    pub async fn purge_task(&self, actor: &Actor, id: TaskId) -> TaskEngineResult<()> {
        require(TaskPolicy::can_purge(actor))?;
        self.repository.delete(id).await?;
        self.record(actor.id(), ActivityAction::TaskDeleted, id, None)
            .await;
        Ok(())
    }

    /// Moves a task on the presentation board.
    ///
    /// Board placement bypasses the lifecycle state machine; only ownership
    /// policy applies.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::Unauthorized`] or
    /// [`TaskEngineError::TaskNotFound`].
    pub async fn move_column(
        &self,
        actor: &Actor,
        id: TaskId,
        column: String,
        sort_order: Option<i32>,
    ) -> TaskEngineResult<TaskProjection> {
        let mut task = self.load(id).await?;
        require(TaskPolicy::can_update(actor, &task))?;

        task.move_to_column(column.clone(), sort_order, &*self.clock);
        self.repository.update(&task, CommitGuard::Exists).await?;
        self.record(
            actor.id(),
            ActivityAction::TaskColumnMoved,
            id,
            Some(json!({ "column": column })),
        )
        .await;

        let projection = self.project(task).await;
        self.notifier.task_changed(&projection).await;
        Ok(projection)
    }

    /// Appends a tracked work interval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::Unauthorized`],
    /// [`TaskEngineError::TaskNotFound`], or a validation error for a
    /// negative interval.
    pub async fn add_time_log(
        &self,
        actor: &Actor,
        id: TaskId,
        entry: NewTimeLog,
    ) -> TaskEngineResult<TaskProjection> {
        let mut task = self.load(id).await?;
        require(TaskPolicy::can_update(actor, &task))?;

        let time_log = TimeLog::new(
            actor.id(),
            entry.started_at,
            entry.ended_at,
            entry.duration_minutes,
        )?;
        task.log_time(time_log, &*self.clock);
        self.repository.update(&task, CommitGuard::Exists).await?;
        self.record(actor.id(), ActivityAction::TaskTimeLogged, id, None)
            .await;

        let projection = self.project(task).await;
        self.notifier.task_changed(&projection).await;
        Ok(projection)
    }

    async fn load(&self, id: TaskId) -> TaskEngineResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskEngineError::TaskNotFound(id))
    }

    /// Builds the response projection, recomputing metrics at `now`.
    ///
    /// Category display names are best-effort: a directory failure degrades
    /// to an unnamed category rather than failing a committed mutation.
    async fn project(&self, task: Task) -> TaskProjection {
        let category_name = match self.categories.find_by_id(task.category()).await {
            Ok(category) => category.map(|found| found.name().to_owned()),
            Err(err) => {
                tracing::warn!(error = %err, task_id = %task.id(), "category lookup failed");
                None
            }
        };
        TaskProjection::new(task, category_name, self.clock.utc())
    }

    /// Appends an audit entry; failures are logged and never unwind the
    /// committed mutation.
    async fn record(
        &self,
        actor: ActorId,
        action: ActivityAction,
        task_id: TaskId,
        metadata: Option<serde_json::Value>,
    ) {
        let mut entry = ActivityLogEntry::new(actor, action, task_id, &*self.clock);
        if let Some(metadata) = metadata {
            entry = entry.with_metadata(metadata);
        }
        if let Err(err) = self.activity.append(&entry).await {
            tracing::error!(error = %err, %task_id, action = %action, "activity append failed");
        }
    }

    async fn resolve_actor(&self, id: ActorId) -> Option<Actor> {
        match self.actors.find_by_id(id).await {
            Ok(actor) => actor,
            Err(err) => {
                tracing::warn!(error = %err, actor_id = %id, "actor lookup failed");
                None
            }
        }
    }

    async fn resolve_actors(&self, ids: &[ActorId]) -> Vec<Actor> {
        match self.actors.find_all_by_ids(ids).await {
            Ok(actors) => actors,
            Err(err) => {
                tracing::warn!(error = %err, "actor lookup failed");
                Vec::new()
            }
        }
    }
}

/// Turns a policy decision into an `Unauthorized` outcome.
fn require(decision: PolicyDecision) -> TaskEngineResult<()> {
    match decision.denial() {
        None => Ok(()),
        Some(reason) => Err(TaskEngineError::Unauthorized(reason)),
    }
}

/// Policy fragment for operations with no target task.
fn active_only(actor: &Actor) -> PolicyDecision {
    if actor.is_active() {
        PolicyDecision::Allowed
    } else {
        PolicyDecision::Denied(crate::task::domain::DenialReason::InactiveActor)
    }
}
