//! Role- and ownership-based authorization over (actor, task) pairs.
//!
//! Every predicate is a total function with no side effects. A denial is a
//! value, not an error; the mutation service turns it into an `Unauthorized`
//! outcome at its boundary.

use super::{Actor, ActorRole, Task, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a policy predicate denied an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// The actor account is deactivated.
    InactiveActor,
    /// The actor is neither an administrator, the creator, an assignee, nor
    /// a member of an assigned team.
    NotInvolved,
    /// The actor is not one of the task's assignees.
    NotAssignee,
    /// The task is already completed.
    AlreadyCompleted,
    /// The action requires an administrator role.
    RequiresAdmin,
    /// The action requires the super administrator role.
    RequiresSuperAdmin,
}

impl DenialReason {
    /// Returns a short human-readable explanation.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InactiveActor => "actor account is deactivated",
            Self::NotInvolved => "actor is not involved with this task",
            Self::NotAssignee => "actor is not assigned to this task",
            Self::AlreadyCompleted => "task is already completed",
            Self::RequiresAdmin => "action requires an administrator",
            Self::RequiresSuperAdmin => "action requires the super administrator",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.message())
    }
}

/// Outcome of a policy predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "decision", content = "reason")]
pub enum PolicyDecision {
    /// The action may proceed.
    Allowed,
    /// The action is denied for the given reason.
    Denied(DenialReason),
}

impl PolicyDecision {
    /// Returns whether the action may proceed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Returns the denial reason, if denied.
    #[must_use]
    pub const fn denial(self) -> Option<DenialReason> {
        match self {
            Self::Allowed => None,
            Self::Denied(reason) => Some(reason),
        }
    }

    /// Chains a further check that runs only when this decision allows.
    fn and_then(self, next: impl FnOnce() -> Self) -> Self {
        match self {
            Self::Allowed => next(),
            Self::Denied(_) => self,
        }
    }
}

/// Stateless authorization predicate set.
#[derive(Debug, Clone, Copy)]
pub struct TaskPolicy;

impl TaskPolicy {
    /// May the actor read the task?
    ///
    /// Administrators, the creator, assignees, and members of an assigned
    /// team may view.
    #[must_use]
    pub fn can_view(actor: &Actor, task: &Task) -> PolicyDecision {
        Self::active(actor).and_then(|| {
            let involved = actor.role().is_admin()
                || task.created_by() == actor.id()
                || task.is_assignee(actor.id())
                || task
                    .assigned_teams()
                    .iter()
                    .any(|team| actor.is_member_of(*team));
            if involved {
                PolicyDecision::Allowed
            } else {
                PolicyDecision::Denied(DenialReason::NotInvolved)
            }
        })
    }

    /// May the actor update the task's details?
    ///
    /// Administrators, the creator, and assignees may update. Team
    /// membership grants visibility only.
    #[must_use]
    pub fn can_update(actor: &Actor, task: &Task) -> PolicyDecision {
        Self::active(actor).and_then(|| {
            let involved = actor.role().is_admin()
                || task.created_by() == actor.id()
                || task.is_assignee(actor.id());
            if involved {
                PolicyDecision::Allowed
            } else {
                PolicyDecision::Denied(DenialReason::NotInvolved)
            }
        })
    }

    /// May the actor complete the task?
    ///
    /// Only assignees complete, and only while the task is not already
    /// completed. Administrators do not complete on behalf of assignees.
    #[must_use]
    pub fn can_complete(actor: &Actor, task: &Task) -> PolicyDecision {
        Self::active(actor).and_then(|| {
            if task.status() == TaskStatus::Completed {
                PolicyDecision::Denied(DenialReason::AlreadyCompleted)
            } else if task.is_assignee(actor.id()) {
                PolicyDecision::Allowed
            } else {
                PolicyDecision::Denied(DenialReason::NotAssignee)
            }
        })
    }

    /// May the actor deploy new tasks?
    #[must_use]
    pub fn can_deploy(actor: &Actor) -> PolicyDecision {
        Self::active(actor).and_then(|| Self::require_admin(actor))
    }

    /// May the actor reassign tasks?
    #[must_use]
    pub fn can_reassign(actor: &Actor) -> PolicyDecision {
        Self::active(actor).and_then(|| Self::require_admin(actor))
    }

    /// May the actor review completed tasks?
    #[must_use]
    pub fn can_review(actor: &Actor) -> PolicyDecision {
        Self::active(actor).and_then(|| Self::require_admin(actor))
    }

    /// May the actor archive tasks?
    #[must_use]
    pub fn can_archive(actor: &Actor) -> PolicyDecision {
        Self::active(actor).and_then(|| Self::require_super_admin(actor))
    }

    /// May the actor purge (hard-delete) tasks?
    #[must_use]
    pub fn can_purge(actor: &Actor) -> PolicyDecision {
        Self::active(actor).and_then(|| Self::require_super_admin(actor))
    }

    fn active(actor: &Actor) -> PolicyDecision {
        if actor.is_active() {
            PolicyDecision::Allowed
        } else {
            PolicyDecision::Denied(DenialReason::InactiveActor)
        }
    }

    fn require_admin(actor: &Actor) -> PolicyDecision {
        if actor.role().is_admin() {
            PolicyDecision::Allowed
        } else {
            PolicyDecision::Denied(DenialReason::RequiresAdmin)
        }
    }

    fn require_super_admin(actor: &Actor) -> PolicyDecision {
        if actor.role() == ActorRole::SuperAdmin {
            PolicyDecision::Allowed
        } else {
            PolicyDecision::Denied(DenialReason::RequiresSuperAdmin)
        }
    }
}
