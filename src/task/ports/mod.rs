//! Port contracts consumed by the task engine.

pub mod activity;
pub mod actor;
pub mod category;
pub mod mailer;
pub mod realtime;
pub mod repository;

pub use activity::{ActivityLog, ActivityLogError, ActivityLogResult};
pub use actor::{ActorDirectory, ActorDirectoryError, ActorDirectoryResult};
pub use category::{CategoryDirectory, CategoryDirectoryError, CategoryDirectoryResult};
pub use mailer::{MailMessage, Mailer, MailerError, MailerResult};
pub use realtime::{RealtimeError, RealtimePublisher, RealtimeResult};
pub use repository::{
    CommitGuard, TaskListFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
};
