//! Category reference data consumed read-only for classification.
//!
//! Category CRUD and slug generation live outside the engine; tasks hold a
//! [`super::CategoryId`] and responses denormalize the category name.

use super::CategoryId;
use serde::{Deserialize, Serialize};

/// A node in the hierarchical category tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    parent_id: Option<CategoryId>,
}

impl Category {
    /// Creates a category snapshot.
    #[must_use]
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: None,
        }
    }

    /// Sets the parent category.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: CategoryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Returns the category identifier.
    #[must_use]
    pub const fn id(&self) -> CategoryId {
        self.id
    }

    /// Returns the category display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parent category, if this is not a root node.
    #[must_use]
    pub const fn parent_id(&self) -> Option<CategoryId> {
        self.parent_id
    }
}
