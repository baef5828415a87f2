//! Behavioural tests for the task mutation service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};
use serde_json::json;

use crate::task::{
    adapters::{
        BroadcastRealtime, MailTemplates,
        memory::{
            InMemoryActivityLog, InMemoryActorDirectory, InMemoryCategoryDirectory,
            InMemoryTaskRepository, RecordingMailer,
        },
    },
    domain::{
        ActivityAction, ActivityLogEntry, Actor, ActorId, ActorRole, Category, CategoryId,
        DenialReason, TaskDraft, TaskId, TaskProjection, TaskStatus,
    },
    ports::{
        ActivityLog, ActivityLogError, ActivityLogResult, MailMessage, Mailer, MailerError,
        MailerResult, TaskListFilter,
    },
    services::{
        ChangeNotificationDispatcher, NewTimeLog, ReviewDecision, TASK_UPDATED_TOPIC,
        TaskEngineError, TaskEngineErrorKind, TaskMutationService, UpdateTaskRequest,
    },
};

type TestService = TaskMutationService<
    InMemoryTaskRepository,
    InMemoryActorDirectory,
    InMemoryCategoryDirectory,
    InMemoryActivityLog,
    RecordingMailer,
    BroadcastRealtime,
    DefaultClock,
>;

struct Harness {
    service: TestService,
    activity: InMemoryActivityLog,
    mailer: RecordingMailer,
    realtime: BroadcastRealtime,
    category_id: CategoryId,
    admin: Actor,
    reyes: Actor,
    okafor: Actor,
    director: Actor,
}

#[fixture]
fn harness() -> Harness {
    let repository = InMemoryTaskRepository::new();
    let actors = InMemoryActorDirectory::new();
    let categories = InMemoryCategoryDirectory::new();
    let activity = InMemoryActivityLog::new();
    let mailer = RecordingMailer::new();
    let realtime = BroadcastRealtime::new();

    let admin = Actor::new(
        ActorId::new(),
        "Commander Adams",
        "adams@registry.example",
        ActorRole::Admin,
    );
    let reyes = Actor::new(
        ActorId::new(),
        "Reyes",
        "reyes@registry.example",
        ActorRole::User,
    );
    let okafor = Actor::new(
        ActorId::new(),
        "Okafor",
        "okafor@registry.example",
        ActorRole::User,
    );
    let director = Actor::new(
        ActorId::new(),
        "Director Hale",
        "hale@registry.example",
        ActorRole::SuperAdmin,
    );
    for actor in [&admin, &reyes, &okafor, &director] {
        actors.insert((*actor).clone()).expect("directory seeds");
    }

    let category = Category::new(CategoryId::new(), "Field Operations");
    let category_id = category.id();
    categories.insert(category).expect("directory seeds");

    let notifier = ChangeNotificationDispatcher::new(
        Arc::new(mailer.clone()),
        Arc::new(realtime.clone()),
        MailTemplates::new().expect("templates compile"),
    );
    let service = TaskMutationService::new(
        Arc::new(repository),
        Arc::new(actors),
        Arc::new(categories),
        Arc::new(activity.clone()),
        notifier,
        Arc::new(DefaultClock),
    );

    Harness {
        service,
        activity,
        mailer,
        realtime,
        category_id,
        admin,
        reyes,
        okafor,
        director,
    }
}

impl Harness {
    fn draft_for(&self, assignee: ActorId) -> TaskDraft {
        TaskDraft::new("Perimeter survey", self.category_id, [assignee])
    }

    async fn deploy_to_reyes(&self) -> TaskProjection {
        self.service
            .deploy_task(&self.admin, self.draft_for(self.reyes.id()))
            .await
            .expect("deploy succeeds")
    }

    fn actions_for(&self, task_id: TaskId) -> Vec<ActivityAction> {
        self.activity
            .all_entries()
            .expect("log reads")
            .iter()
            .filter(|entry| entry.entity_id() == task_id)
            .map(ActivityLogEntry::action)
            .collect()
    }

    fn mail_count(&self) -> usize {
        self.mailer.sent_messages().expect("mailer reads").len()
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deploy_requires_admin_role(harness: Harness) {
    let result = harness
        .service
        .deploy_task(&harness.reyes, harness.draft_for(harness.reyes.id()))
        .await;
    assert!(matches!(
        result,
        Err(TaskEngineError::Unauthorized(DenialReason::RequiresAdmin))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deploy_rejects_unknown_category(harness: Harness) {
    let draft = TaskDraft::new("Perimeter survey", CategoryId::new(), [harness.reyes.id()]);
    let result = harness.service.deploy_task(&harness.admin, draft).await;
    assert!(matches!(result, Err(TaskEngineError::CategoryNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deploy_records_audit_and_mails_assignees(harness: Harness) {
    let projection = harness.deploy_to_reyes().await;

    assert_eq!(projection.task.status(), TaskStatus::Pending);
    assert_eq!(projection.category_name.as_deref(), Some("Field Operations"));
    assert_eq!(
        harness.actions_for(projection.task.id()),
        vec![ActivityAction::TaskCreated]
    );

    let sent = harness.mailer.sent_messages().expect("mailer reads");
    assert_eq!(sent.len(), 1);
    let mail = sent.first().expect("one assignment mail");
    assert_eq!(mail.to, "reyes@registry.example");
    assert!(mail.subject.contains("Perimeter survey"));
    assert!(mail.html_body.contains("Commander Adams"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn first_read_auto_acknowledges_exactly_once(harness: Harness) {
    let task_id = harness.deploy_to_reyes().await.task.id();

    let first = harness
        .service
        .get_task(&harness.reyes, task_id)
        .await
        .expect("fetch succeeds");
    assert_eq!(first.task.status(), TaskStatus::Acknowledged);
    assert!(first.task.acknowledged_at().is_some());

    let second = harness
        .service
        .get_task(&harness.reyes, task_id)
        .await
        .expect("fetch succeeds");
    assert_eq!(second.task.status(), TaskStatus::Acknowledged);
    assert_eq!(second.task.acknowledged_at(), first.task.acknowledged_at());

    let acknowledgements: Vec<ActivityLogEntry> = harness
        .activity
        .all_entries()
        .expect("log reads")
        .into_iter()
        .filter(|entry| entry.action() == ActivityAction::TaskAcknowledged)
        .collect();
    assert_eq!(acknowledgements.len(), 1);
    let entry = acknowledgements.first().expect("one acknowledgement entry");
    assert_eq!(entry.metadata(), Some(&json!({ "auto": true })));

    // One assignment mail plus exactly one acknowledgement pair.
    assert_eq!(harness.mail_count(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_read_does_not_acknowledge(harness: Harness) {
    let task_id = harness.deploy_to_reyes().await.task.id();

    let fetched = harness
        .service
        .get_task(&harness.admin, task_id)
        .await
        .expect("fetch succeeds");
    assert_eq!(fetched.task.status(), TaskStatus::Pending);
    assert_eq!(harness.actions_for(task_id), vec![ActivityAction::TaskCreated]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn uninvolved_user_is_unauthorized_everywhere(harness: Harness) {
    let task_id = harness.deploy_to_reyes().await.task.id();
    let outsider = &harness.okafor;

    let fetched = harness.service.get_task(outsider, task_id).await;
    assert!(matches!(
        fetched,
        Err(TaskEngineError::Unauthorized(DenialReason::NotInvolved))
    ));

    let updated = harness
        .service
        .update_task(outsider, task_id, UpdateTaskRequest::default())
        .await;
    assert!(matches!(
        updated,
        Err(TaskEngineError::Unauthorized(DenialReason::NotInvolved))
    ));

    let completed = harness.service.complete_task(outsider, task_id).await;
    assert!(matches!(
        completed,
        Err(TaskEngineError::Unauthorized(DenialReason::NotAssignee))
    ));

    let archived = harness.service.archive_task(outsider, task_id).await;
    assert!(matches!(
        archived,
        Err(TaskEngineError::Unauthorized(DenialReason::RequiresSuperAdmin))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn complete_flow_stamps_audits_and_notifies(harness: Harness) {
    let clock = DefaultClock;
    let draft = harness
        .draft_for(harness.reyes.id())
        .with_due_date(clock.utc() + Duration::hours(24));
    let task_id = harness
        .service
        .deploy_task(&harness.admin, draft)
        .await
        .expect("deploy succeeds")
        .task
        .id();

    let fetched = harness
        .service
        .get_task(&harness.reyes, task_id)
        .await
        .expect("fetch succeeds");
    assert_eq!(fetched.metrics.days_remaining, Some(1));
    assert!(!fetched.metrics.is_overdue);

    let completed = harness
        .service
        .complete_task(&harness.reyes, task_id)
        .await
        .expect("completion succeeds");
    assert_eq!(completed.task.status(), TaskStatus::Completed);
    assert!(completed.task.completed_at().is_some());

    assert_eq!(
        harness.actions_for(task_id),
        vec![
            ActivityAction::TaskCreated,
            ActivityAction::TaskAcknowledged,
            ActivityAction::TaskCompleted,
        ]
    );

    let sent = harness.mailer.sent_messages().expect("mailer reads");
    let completion_mail = sent.last().expect("completion mail sent");
    assert_eq!(completion_mail.to, "adams@registry.example");
    assert!(completion_mail.subject.contains("Mission Accomplished"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_unacknowledged_task_is_a_protocol_error(harness: Harness) {
    let task_id = harness.deploy_to_reyes().await.task.id();

    let result = harness.service.complete_task(&harness.reyes, task_id).await;
    let Err(err) = result else {
        panic!("pending task must not complete");
    };
    assert_eq!(err.kind(), TaskEngineErrorKind::InvalidTransition);

    assert_eq!(harness.actions_for(task_id), vec![ActivityAction::TaskCreated]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dependency_gate_blocks_until_prerequisite_completes(harness: Harness) {
    let prerequisite_id = harness.deploy_to_reyes().await.task.id();
    let dependent_id = harness
        .service
        .deploy_task(
            &harness.admin,
            harness
                .draft_for(harness.reyes.id())
                .with_dependencies([prerequisite_id]),
        )
        .await
        .expect("deploy succeeds")
        .task
        .id();

    harness
        .service
        .get_task(&harness.reyes, dependent_id)
        .await
        .expect("fetch succeeds");

    let blocked = harness
        .service
        .complete_task(&harness.reyes, dependent_id)
        .await;
    assert!(matches!(
        blocked,
        Err(TaskEngineError::DependencyBlocked { ref incomplete, .. })
            if incomplete == &vec![prerequisite_id]
    ));

    // No status change and no completion audit for the blocked attempt.
    let dependent = harness
        .service
        .get_task(&harness.reyes, dependent_id)
        .await
        .expect("fetch succeeds");
    assert_eq!(dependent.task.status(), TaskStatus::Acknowledged);
    assert!(
        !harness
            .actions_for(dependent_id)
            .contains(&ActivityAction::TaskCompleted)
    );

    harness
        .service
        .get_task(&harness.reyes, prerequisite_id)
        .await
        .expect("fetch succeeds");
    harness
        .service
        .complete_task(&harness.reyes, prerequisite_id)
        .await
        .expect("prerequisite completes");

    let retried = harness
        .service
        .complete_task(&harness.reyes, dependent_id)
        .await
        .expect("identical retry succeeds");
    assert_eq!(retried.task.status(), TaskStatus::Completed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassignment_resets_lifecycle_and_renotifies(harness: Harness) {
    let task_id = harness.deploy_to_reyes().await.task.id();
    harness
        .service
        .get_task(&harness.reyes, task_id)
        .await
        .expect("fetch succeeds");
    harness
        .service
        .complete_task(&harness.reyes, task_id)
        .await
        .expect("completion succeeds");

    let reassigned = harness
        .service
        .reassign_task(&harness.admin, task_id, vec![harness.okafor.id()], vec![])
        .await
        .expect("reassignment succeeds");

    assert_eq!(reassigned.task.status(), TaskStatus::Pending);
    assert_eq!(reassigned.task.assigned_to(), &[harness.okafor.id()]);
    assert!(reassigned.task.acknowledged_at().is_none());
    assert!(reassigned.task.completed_at().is_none());
    assert_eq!(
        harness
            .actions_for(task_id)
            .iter()
            .filter(|action| **action == ActivityAction::TaskReassigned)
            .count(),
        1
    );

    let sent = harness.mailer.sent_messages().expect("mailer reads");
    let assignment_mail = sent.last().expect("assignment mail sent");
    assert_eq!(assignment_mail.to, "okafor@registry.example");

    let result = harness
        .service
        .reassign_task(&harness.reyes, task_id, vec![harness.reyes.id()], vec![])
        .await;
    assert!(matches!(
        result,
        Err(TaskEngineError::Unauthorized(DenialReason::RequiresAdmin))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn review_rejection_reopens_the_task(harness: Harness) {
    let task_id = harness.deploy_to_reyes().await.task.id();
    harness
        .service
        .get_task(&harness.reyes, task_id)
        .await
        .expect("fetch succeeds");
    harness
        .service
        .complete_task(&harness.reyes, task_id)
        .await
        .expect("completion succeeds");

    let rejected = harness
        .service
        .review_task(
            &harness.admin,
            task_id,
            ReviewDecision::Reject,
            Some("Resubmit with photos".to_owned()),
        )
        .await
        .expect("review succeeds");
    assert_eq!(rejected.task.status(), TaskStatus::Acknowledged);
    assert!(rejected.task.completed_at().is_none());

    let entries = harness.activity.all_entries().expect("log reads");
    let rejection = entries
        .iter()
        .find(|entry| entry.action() == ActivityAction::TaskRejected)
        .expect("rejection recorded");
    assert_eq!(
        rejection.metadata(),
        Some(&json!({ "feedback": "Resubmit with photos" }))
    );

    // The assignee may now complete again.
    harness
        .service
        .complete_task(&harness.reyes, task_id)
        .await
        .expect("second completion succeeds");

    let approved = harness
        .service
        .review_task(&harness.admin, task_id, ReviewDecision::Approve, None)
        .await
        .expect("approval succeeds");
    assert_eq!(approved.task.status(), TaskStatus::Completed);
    assert!(approved.task.completed_at().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn review_requires_a_completed_task(harness: Harness) {
    let task_id = harness.deploy_to_reyes().await.task.id();
    let result = harness
        .service
        .review_task(&harness.admin, task_id, ReviewDecision::Approve, None)
        .await;
    let Err(err) = result else {
        panic!("pending task must not be reviewable");
    };
    assert_eq!(err.kind(), TaskEngineErrorKind::InvalidTransition);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archive_hides_task_from_default_listings(harness: Harness) {
    let task_id = harness.deploy_to_reyes().await.task.id();

    harness
        .service
        .archive_task(&harness.director, task_id)
        .await
        .expect("archive succeeds");

    let listed = harness
        .service
        .list_tasks(&harness.admin, TaskListFilter::new())
        .await
        .expect("listing succeeds");
    assert!(listed.is_empty());

    let explicit = harness
        .service
        .list_tasks(&harness.admin, TaskListFilter::new().with_archived())
        .await
        .expect("listing succeeds");
    assert_eq!(explicit.len(), 1);

    assert!(
        harness
            .actions_for(task_id)
            .contains(&ActivityAction::TaskArchived)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn purge_is_super_admin_only_and_permanent(harness: Harness) {
    let task_id = harness.deploy_to_reyes().await.task.id();

    let denied = harness.service.purge_task(&harness.admin, task_id).await;
    assert!(matches!(
        denied,
        Err(TaskEngineError::Unauthorized(DenialReason::RequiresSuperAdmin))
    ));

    harness
        .service
        .purge_task(&harness.director, task_id)
        .await
        .expect("purge succeeds");
    assert!(
        harness
            .actions_for(task_id)
            .contains(&ActivityAction::TaskDeleted)
    );

    let result = harness.service.get_task(&harness.director, task_id).await;
    assert!(matches!(result, Err(TaskEngineError::TaskNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_and_time_log_writes_bypass_the_lifecycle(harness: Harness) {
    let clock = DefaultClock;
    let task_id = harness.deploy_to_reyes().await.task.id();
    harness
        .service
        .get_task(&harness.reyes, task_id)
        .await
        .expect("fetch succeeds");
    harness
        .service
        .complete_task(&harness.reyes, task_id)
        .await
        .expect("completion succeeds");

    let moved = harness
        .service
        .move_column(&harness.reyes, task_id, "done".to_owned(), Some(3))
        .await
        .expect("board move succeeds on a completed task");
    assert_eq!(moved.task.board_column(), Some("done"));
    assert_eq!(moved.task.sort_order(), Some(3));

    let start = clock.utc() - Duration::minutes(45);
    let logged = harness
        .service
        .add_time_log(
            &harness.reyes,
            task_id,
            NewTimeLog {
                started_at: start,
                ended_at: Some(start + Duration::minutes(45)),
                duration_minutes: None,
            },
        )
        .await
        .expect("time log succeeds on a completed task");
    let entry = logged.task.time_logs().last().expect("interval appended");
    assert_eq!(entry.duration_minutes(), Some(45));
    assert_eq!(entry.actor(), harness.reyes.id());

    let actions = harness.actions_for(task_id);
    assert!(actions.contains(&ActivityAction::TaskColumnMoved));
    assert!(actions.contains(&ActivityAction::TaskTimeLogged));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn realtime_subscribers_see_post_mutation_projections(harness: Harness) {
    let mut events = harness.realtime.subscribe();

    let task_id = harness.deploy_to_reyes().await.task.id();

    let event = events.recv().await.expect("deploy event broadcast");
    assert_eq!(event.topic, TASK_UPDATED_TOPIC);
    assert_eq!(
        event.payload.get("status").and_then(|status| status.as_str()),
        Some("pending")
    );
    assert_eq!(
        event.payload.get("id").and_then(|id| id.as_str()),
        Some(task_id.to_string().as_str())
    );

    harness
        .service
        .get_task(&harness.reyes, task_id)
        .await
        .expect("fetch succeeds");
    let ack_event = events.recv().await.expect("acknowledge event broadcast");
    assert_eq!(
        ack_event.payload.get("status").and_then(|status| status.as_str()),
        Some("acknowledged")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_listing_is_limited_to_own_assignments(harness: Harness) {
    harness.deploy_to_reyes().await;
    harness
        .service
        .deploy_task(&harness.admin, harness.draft_for(harness.okafor.id()))
        .await
        .expect("deploy succeeds");

    let own = harness
        .service
        .list_tasks(&harness.reyes, TaskListFilter::new())
        .await
        .expect("listing succeeds");
    assert_eq!(own.len(), 1);
    assert!(own.iter().all(|p| p.task.is_assignee(harness.reyes.id())));

    // A user cannot widen the listing to someone else's assignments.
    let widened = harness
        .service
        .list_tasks(
            &harness.reyes,
            TaskListFilter::new().with_assignee(harness.okafor.id()),
        )
        .await
        .expect("listing succeeds");
    assert_eq!(widened.len(), 1);
    assert!(widened.iter().all(|p| p.task.is_assignee(harness.reyes.id())));

    let all = harness
        .service
        .list_tasks(&harness.admin, TaskListFilter::new())
        .await
        .expect("listing succeeds");
    assert_eq!(all.len(), 2);

    let inactive = harness.reyes.clone().deactivated();
    let denied = harness.service.list_tasks(&inactive, TaskListFilter::new()).await;
    assert!(matches!(
        denied,
        Err(TaskEngineError::Unauthorized(DenialReason::InactiveActor))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_task_routes_completion_through_the_protocol(harness: Harness) {
    let task_id = harness.deploy_to_reyes().await.task.id();

    // Completing through update on a pending task hits the same protocol
    // error as the dedicated action.
    let premature = harness
        .service
        .update_task(
            &harness.reyes,
            task_id,
            UpdateTaskRequest {
                status: Some(TaskStatus::Completed),
                ..UpdateTaskRequest::default()
            },
        )
        .await;
    let Err(err) = premature else {
        panic!("pending task must not complete through update");
    };
    assert_eq!(err.kind(), TaskEngineErrorKind::InvalidTransition);

    harness
        .service
        .get_task(&harness.reyes, task_id)
        .await
        .expect("fetch succeeds");
    let completed = harness
        .service
        .update_task(
            &harness.reyes,
            task_id,
            UpdateTaskRequest {
                status: Some(TaskStatus::Completed),
                ..UpdateTaskRequest::default()
            },
        )
        .await
        .expect("update-completion succeeds");
    assert_eq!(completed.task.status(), TaskStatus::Completed);
    assert!(
        harness
            .actions_for(task_id)
            .contains(&ActivityAction::TaskCompleted)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_places_task_on_hold_through_update(harness: Harness) {
    let task_id = harness.deploy_to_reyes().await.task.id();

    let held = harness
        .service
        .update_task(
            &harness.admin,
            task_id,
            UpdateTaskRequest {
                status: Some(TaskStatus::OnHold),
                ..UpdateTaskRequest::default()
            },
        )
        .await
        .expect("update succeeds");
    assert_eq!(held.task.status(), TaskStatus::OnHold);
    assert!(
        harness
            .actions_for(task_id)
            .contains(&ActivityAction::TaskUpdated)
    );
}

/// Activity log that always fails, for isolation tests.
#[derive(Debug, Clone, Default)]
struct FailingActivityLog;

#[async_trait]
impl ActivityLog for FailingActivityLog {
    async fn append(&self, _entry: &ActivityLogEntry) -> ActivityLogResult<()> {
        Err(ActivityLogError::persistence(std::io::Error::other(
            "audit store offline",
        )))
    }

    async fn entries_for_task(&self, _task_id: TaskId) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        Ok(Vec::new())
    }
}

/// Mailer that always fails, for isolation tests.
#[derive(Debug, Clone, Default)]
struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _message: MailMessage) -> MailerResult<()> {
        Err(MailerError::delivery(std::io::Error::other(
            "smtp relay unreachable",
        )))
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn audit_and_mail_failures_never_fail_the_mutation(harness: Harness) {
    let actors = InMemoryActorDirectory::new();
    actors.insert(harness.admin.clone()).expect("directory seeds");
    actors.insert(harness.reyes.clone()).expect("directory seeds");
    let categories = InMemoryCategoryDirectory::new();
    categories
        .insert(Category::new(harness.category_id, "Field Operations"))
        .expect("directory seeds");

    let notifier = ChangeNotificationDispatcher::new(
        Arc::new(FailingMailer),
        Arc::new(BroadcastRealtime::new()),
        MailTemplates::new().expect("templates compile"),
    );
    let service = TaskMutationService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(actors),
        Arc::new(categories),
        Arc::new(FailingActivityLog),
        notifier,
        Arc::new(DefaultClock),
    );

    let deployed = service
        .deploy_task(
            &harness.admin,
            TaskDraft::new("Perimeter survey", harness.category_id, [harness.reyes.id()]),
        )
        .await
        .expect("deploy commits despite audit and mail failures");

    let fetched = service
        .get_task(&harness.reyes, deployed.task.id())
        .await
        .expect("fetch commits despite audit and mail failures");
    assert_eq!(fetched.task.status(), TaskStatus::Acknowledged);

    let completed = service
        .complete_task(&harness.reyes, deployed.task.id())
        .await
        .expect("completion commits despite audit and mail failures");
    assert_eq!(completed.task.status(), TaskStatus::Completed);
}
