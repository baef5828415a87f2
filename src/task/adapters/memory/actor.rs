//! In-memory actor directory for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Actor, ActorId},
    ports::{ActorDirectory, ActorDirectoryError, ActorDirectoryResult},
};

/// Thread-safe in-memory actor directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActorDirectory {
    state: Arc<RwLock<HashMap<ActorId, Actor>>>,
}

impl InMemoryActorDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds or replaces an actor record.
    ///
    /// # Errors
    ///
    /// Returns [`ActorDirectoryError::Persistence`] when the directory lock
    /// is poisoned.
    pub fn insert(&self, actor: Actor) -> ActorDirectoryResult<()> {
        let mut actors = self.state.write().map_err(|err| {
            ActorDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        actors.insert(actor.id(), actor);
        Ok(())
    }
}

#[async_trait]
impl ActorDirectory for InMemoryActorDirectory {
    async fn find_by_id(&self, id: ActorId) -> ActorDirectoryResult<Option<Actor>> {
        let actors = self.state.read().map_err(|err| {
            ActorDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(actors.get(&id).cloned())
    }

    async fn find_all_by_ids(&self, ids: &[ActorId]) -> ActorDirectoryResult<Vec<Actor>> {
        let actors = self.state.read().map_err(|err| {
            ActorDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(ids.iter().filter_map(|id| actors.get(id).cloned()).collect())
    }
}
