//! Outbound mail port.
//!
//! Sends are fire-and-forget from the engine's point of view: failures are
//! logged by the dispatcher and never surfaced to the mutating caller.
//! Retry policy, if any, belongs to the mail collaborator.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for mail operations.
pub type MailerResult<T> = Result<T, MailerError>;

/// A rendered outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Rendered HTML body.
    pub html_body: String,
}

/// Mail delivery contract.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Hands one message to the mail collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Delivery`] when the hand-off fails.
    async fn send(&self, message: MailMessage) -> MailerResult<()>;
}

/// Errors returned by mailer implementations.
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    /// The message could not be handed to the mail collaborator.
    #[error("mail delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl MailerError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
