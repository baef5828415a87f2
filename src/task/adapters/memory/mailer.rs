//! Recording mailer used by tests and headless deployments.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::ports::{MailMessage, Mailer, MailerError, MailerResult};

/// Mailer that records every message instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<RwLock<Vec<MailMessage>>>,
}

impl RecordingMailer {
    /// Creates an empty recording mailer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded message in send order.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Delivery`] when the record lock is poisoned.
    pub fn sent_messages(&self) -> MailerResult<Vec<MailMessage>> {
        let sent = self
            .sent
            .read()
            .map_err(|err| MailerError::delivery(std::io::Error::other(err.to_string())))?;
        Ok(sent.clone())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: MailMessage) -> MailerResult<()> {
        let mut sent = self
            .sent
            .write()
            .map_err(|err| MailerError::delivery(std::io::Error::other(err.to_string())))?;
        sent.push(message);
        Ok(())
    }
}
