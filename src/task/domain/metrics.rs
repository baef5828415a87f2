//! Derived scheduling metrics and the read-side task projection.
//!
//! Metrics are pure functions of a task snapshot and `now`. They are never
//! persisted; a stored value would go stale as the clock advances, so every
//! serialization recomputes them.

use super::{Task, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: u64 = 86_400;

/// Scheduling metrics computed at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMetrics {
    /// Whole days until the due date, rounded up, floored at zero.
    /// `None` when the task has no due date.
    pub days_remaining: Option<u64>,
    /// Whether the due date has passed without completion.
    pub is_overdue: bool,
}

impl TaskMetrics {
    /// Computes metrics for a task snapshot at the given instant.
    #[must_use]
    pub fn for_task(task: &Task, now: DateTime<Utc>) -> Self {
        let Some(due_date) = task.due_date() else {
            return Self {
                days_remaining: None,
                is_overdue: false,
            };
        };

        let seconds = due_date.signed_duration_since(now).num_seconds();
        let days_remaining = if seconds <= 0 {
            0
        } else {
            u64::try_from(seconds).unwrap_or_default().div_ceil(SECONDS_PER_DAY)
        };

        Self {
            days_remaining: Some(days_remaining),
            is_overdue: now > due_date && task.status() != TaskStatus::Completed,
        }
    }
}

/// Post-mutation task view returned to callers and published to realtime
/// subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskProjection {
    /// The task record.
    #[serde(flatten)]
    pub task: Task,
    /// Denormalized category name for display.
    pub category_name: Option<String>,
    /// Metrics recomputed for this serialization.
    pub metrics: TaskMetrics,
}

impl TaskProjection {
    /// Builds a projection, computing metrics at `now`.
    #[must_use]
    pub fn new(task: Task, category_name: Option<String>, now: DateTime<Utc>) -> Self {
        let metrics = TaskMetrics::for_task(&task, now);
        Self {
            task,
            category_name,
            metrics,
        }
    }
}
