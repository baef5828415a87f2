//! `PostgreSQL` adapter for task and audit persistence.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresActivityLog, PostgresTaskRepository, TaskPgPool};
