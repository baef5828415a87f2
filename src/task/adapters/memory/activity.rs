//! In-memory activity log for tests and embedding.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{ActivityLogEntry, TaskId},
    ports::{ActivityLog, ActivityLogError, ActivityLogResult},
};

/// Thread-safe in-memory append-only activity log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityLog {
    entries: Arc<RwLock<Vec<ActivityLogEntry>>>,
}

impl InMemoryActivityLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded entry in append order.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityLogError::Persistence`] when the log lock is
    /// poisoned.
    pub fn all_entries(&self) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        let entries = self.entries.read().map_err(|err| {
            ActivityLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries.clone())
    }
}

#[async_trait]
impl ActivityLog for InMemoryActivityLog {
    async fn append(&self, entry: &ActivityLogEntry) -> ActivityLogResult<()> {
        let mut entries = self.entries.write().map_err(|err| {
            ActivityLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        entries.push(entry.clone());
        Ok(())
    }

    async fn entries_for_task(&self, task_id: TaskId) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        let entries = self.entries.read().map_err(|err| {
            ActivityLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries
            .iter()
            .filter(|entry| entry.entity_id() == task_id)
            .cloned()
            .collect())
    }
}
