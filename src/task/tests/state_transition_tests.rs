//! Unit tests for the lifecycle status machine.

use super::fixtures::{admin, category, pending_task};
use crate::task::domain::{ActorId, Task, TaskDomainError, TaskStatus};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn task() -> Task {
    pending_task(category().id(), admin().id(), ActorId::new())
}

#[rstest]
#[case(TaskStatus::Pending, TaskStatus::Pending, false)]
#[case(TaskStatus::Pending, TaskStatus::Acknowledged, true)]
#[case(TaskStatus::Pending, TaskStatus::Completed, false)]
#[case(TaskStatus::Pending, TaskStatus::OnHold, true)]
#[case(TaskStatus::Pending, TaskStatus::Archived, true)]
#[case(TaskStatus::Acknowledged, TaskStatus::Pending, true)]
#[case(TaskStatus::Acknowledged, TaskStatus::Acknowledged, false)]
#[case(TaskStatus::Acknowledged, TaskStatus::Completed, true)]
#[case(TaskStatus::Acknowledged, TaskStatus::OnHold, true)]
#[case(TaskStatus::Acknowledged, TaskStatus::Archived, true)]
#[case(TaskStatus::Completed, TaskStatus::Pending, true)]
#[case(TaskStatus::Completed, TaskStatus::Acknowledged, true)]
#[case(TaskStatus::Completed, TaskStatus::Completed, false)]
#[case(TaskStatus::Completed, TaskStatus::OnHold, true)]
#[case(TaskStatus::Completed, TaskStatus::Archived, true)]
#[case(TaskStatus::OnHold, TaskStatus::Pending, true)]
#[case(TaskStatus::OnHold, TaskStatus::Acknowledged, true)]
#[case(TaskStatus::OnHold, TaskStatus::Completed, false)]
#[case(TaskStatus::OnHold, TaskStatus::OnHold, false)]
#[case(TaskStatus::OnHold, TaskStatus::Archived, true)]
#[case(TaskStatus::Archived, TaskStatus::Pending, false)]
#[case(TaskStatus::Archived, TaskStatus::Acknowledged, false)]
#[case(TaskStatus::Archived, TaskStatus::Completed, false)]
#[case(TaskStatus::Archived, TaskStatus::OnHold, false)]
#[case(TaskStatus::Archived, TaskStatus::Archived, false)]
fn can_transition_to_returns_expected(
    #[case] from: TaskStatus,
    #[case] to: TaskStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
#[case(TaskStatus::Pending, false)]
#[case(TaskStatus::Acknowledged, false)]
#[case(TaskStatus::Completed, false)]
#[case(TaskStatus::OnHold, false)]
#[case(TaskStatus::Archived, true)]
fn is_terminal_returns_expected(#[case] status: TaskStatus, #[case] expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[rstest]
fn complete_from_pending_demands_acknowledgement(
    clock: DefaultClock,
    mut task: Task,
) -> eyre::Result<()> {
    let result = task.complete(&clock);
    let expected = Err(TaskDomainError::AcknowledgementRequired(task.id()));
    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(task.status() == TaskStatus::Pending);
    ensure!(task.completed_at().is_none());
    Ok(())
}

#[rstest]
fn complete_from_on_hold_is_rejected(clock: DefaultClock, mut task: Task) -> eyre::Result<()> {
    task.set_status(TaskStatus::OnHold, &clock)?;

    let result = task.complete(&clock);
    let expected = Err(TaskDomainError::InvalidStatusTransition {
        task_id: task.id(),
        from: TaskStatus::OnHold,
        to: TaskStatus::Completed,
    });
    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(task.status() == TaskStatus::OnHold);
    Ok(())
}

#[rstest]
#[case(TaskStatus::Completed)]
#[case(TaskStatus::Archived)]
fn set_status_rejects_guarded_targets(
    #[case] target: TaskStatus,
    clock: DefaultClock,
    mut task: Task,
) -> eyre::Result<()> {
    task.acknowledge(&clock)?;

    let result = task.set_status(target, &clock);
    let expected = Err(TaskDomainError::InvalidStatusTransition {
        task_id: task.id(),
        from: TaskStatus::Acknowledged,
        to: target,
    });
    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(task.status() == TaskStatus::Acknowledged);
    Ok(())
}

#[rstest]
fn on_hold_round_trip_preserves_acknowledgement(
    clock: DefaultClock,
    mut task: Task,
) -> eyre::Result<()> {
    task.acknowledge(&clock)?;
    let acknowledged_at = task.acknowledged_at();

    task.set_status(TaskStatus::OnHold, &clock)?;
    task.set_status(TaskStatus::Acknowledged, &clock)?;
    task.complete(&clock)?;

    ensure!(task.status() == TaskStatus::Completed);
    ensure!(task.acknowledged_at() == acknowledged_at);
    Ok(())
}

#[rstest]
fn archived_task_rejects_reassignment(clock: DefaultClock, mut task: Task) -> eyre::Result<()> {
    task.archive(ActorId::new(), &clock)?;

    let result = task.reassign([ActorId::new()], [], &clock);
    let expected = Err(TaskDomainError::InvalidStatusTransition {
        task_id: task.id(),
        from: TaskStatus::Archived,
        to: TaskStatus::Pending,
    });
    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(task.status() == TaskStatus::Archived);
    Ok(())
}
