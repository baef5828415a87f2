//! Read-only directory port for actor records.
//!
//! Actor records are owned by the identity collaborator; the engine only
//! reads them to resolve policy inputs and notification recipients.

use crate::task::domain::{Actor, ActorId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for actor directory operations.
pub type ActorDirectoryResult<T> = Result<T, ActorDirectoryError>;

/// Actor lookup contract.
#[async_trait]
pub trait ActorDirectory: Send + Sync {
    /// Finds an actor by identifier.
    ///
    /// Returns `None` when no such actor exists.
    async fn find_by_id(&self, id: ActorId) -> ActorDirectoryResult<Option<Actor>>;

    /// Loads the given actors, skipping identifiers that do not resolve.
    async fn find_all_by_ids(&self, ids: &[ActorId]) -> ActorDirectoryResult<Vec<Actor>>;
}

/// Errors returned by actor directory implementations.
#[derive(Debug, Clone, Error)]
pub enum ActorDirectoryError {
    /// Persistence-layer failure.
    #[error("actor directory error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActorDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
