//! Shared constructors for engine tests.

use crate::task::domain::{Actor, ActorId, ActorRole, Category, CategoryId, Task, TaskDraft};
use mockable::DefaultClock;

pub fn admin() -> Actor {
    Actor::new(
        ActorId::new(),
        "Commander Adams",
        "adams@registry.example",
        ActorRole::Admin,
    )
}

pub fn super_admin() -> Actor {
    Actor::new(
        ActorId::new(),
        "Director Hale",
        "hale@registry.example",
        ActorRole::SuperAdmin,
    )
}

pub fn operative(name: &str) -> Actor {
    let email = format!("{}@registry.example", name.to_ascii_lowercase().replace(' ', "."));
    Actor::new(ActorId::new(), name, email, ActorRole::User)
}

pub fn category() -> Category {
    Category::new(CategoryId::new(), "Field Operations")
}

pub fn draft(category_id: CategoryId, assignee: ActorId) -> TaskDraft {
    TaskDraft::new("Perimeter survey", category_id, [assignee])
}

/// Deploys a pending task assigned to `assignee`, created by `creator`.
pub fn pending_task(category_id: CategoryId, creator: ActorId, assignee: ActorId) -> Task {
    Task::deploy(draft(category_id, assignee), creator, &DefaultClock).expect("valid draft")
}
