//! In-memory category directory for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Category, CategoryId},
    ports::{CategoryDirectory, CategoryDirectoryError, CategoryDirectoryResult},
};

/// Thread-safe in-memory category directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryDirectory {
    state: Arc<RwLock<HashMap<CategoryId, Category>>>,
}

impl InMemoryCategoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds or replaces a category node.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryDirectoryError::Persistence`] when the directory
    /// lock is poisoned.
    pub fn insert(&self, category: Category) -> CategoryDirectoryResult<()> {
        let mut categories = self.state.write().map_err(|err| {
            CategoryDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        categories.insert(category.id(), category);
        Ok(())
    }
}

#[async_trait]
impl CategoryDirectory for InMemoryCategoryDirectory {
    async fn find_by_id(&self, id: CategoryId) -> CategoryDirectoryResult<Option<Category>> {
        let categories = self.state.read().map_err(|err| {
            CategoryDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(categories.get(&id).cloned())
    }
}
