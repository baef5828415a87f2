//! Orchestration services for the task engine.

mod error;
mod gate;
mod mutation;
mod notifier;

pub use error::{TaskEngineError, TaskEngineErrorKind, TaskEngineResult};
pub use gate::{DependencyGate, GateStatus};
pub use mutation::{NewTimeLog, ReviewDecision, TaskMutationService, UpdateTaskRequest};
pub use notifier::{ChangeNotificationDispatcher, TASK_UPDATED_TOPIC};
