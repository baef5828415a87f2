//! Read-only directory port for category reference data.

use crate::task::domain::{Category, CategoryId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for category directory operations.
pub type CategoryDirectoryResult<T> = Result<T, CategoryDirectoryError>;

/// Category lookup contract.
#[async_trait]
pub trait CategoryDirectory: Send + Sync {
    /// Finds a category by identifier.
    ///
    /// Returns `None` when no such category exists.
    async fn find_by_id(&self, id: CategoryId) -> CategoryDirectoryResult<Option<Category>>;
}

/// Errors returned by category directory implementations.
#[derive(Debug, Clone, Error)]
pub enum CategoryDirectoryError {
    /// Persistence-layer failure.
    #[error("category directory error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CategoryDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
