//! Realtime broadcast port for change notifications.
//!
//! Publishing is best-effort broadcast: no acknowledgement is required and
//! a topic with zero subscribers is a successful publish.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for realtime publish operations.
pub type RealtimeResult<T> = Result<T, RealtimeError>;

/// Realtime transport contract.
#[async_trait]
pub trait RealtimePublisher: Send + Sync {
    /// Broadcasts a payload to all subscribers of a topic.
    ///
    /// # Errors
    ///
    /// Returns [`RealtimeError::Publish`] when the transport rejects the
    /// payload.
    async fn publish(&self, topic: &str, payload: Value) -> RealtimeResult<()>;
}

/// Errors returned by realtime publisher implementations.
#[derive(Debug, Clone, Error)]
pub enum RealtimeError {
    /// The payload could not be broadcast.
    #[error("realtime publish failed: {0}")]
    Publish(Arc<dyn std::error::Error + Send + Sync>),
}

impl RealtimeError {
    /// Wraps a publish error.
    pub fn publish(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Publish(Arc::new(err))
    }
}
