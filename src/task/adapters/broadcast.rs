//! In-process realtime publisher backed by a tokio broadcast channel.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::task::ports::{RealtimePublisher, RealtimeResult};

const DEFAULT_CAPACITY: usize = 256;

/// An event delivered to realtime subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealtimeEvent {
    /// Topic the event was published on.
    pub topic: String,
    /// Structured event payload.
    pub payload: Value,
}

/// Broadcast-channel realtime publisher.
///
/// Subscribers receive every event published after they subscribe. A
/// publish with no subscribers succeeds; the channel is a non-authoritative
/// side channel and delivery is best-effort.
#[derive(Debug, Clone)]
pub struct BroadcastRealtime {
    sender: broadcast::Sender<RealtimeEvent>,
}

impl BroadcastRealtime {
    /// Creates a publisher with the default buffer capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a publisher buffering up to `capacity` undelivered events
    /// per subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Opens a new subscription receiving subsequently published events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastRealtime {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RealtimePublisher for BroadcastRealtime {
    async fn publish(&self, topic: &str, payload: Value) -> RealtimeResult<()> {
        // A send error only means there are no subscribers right now.
        drop(self.sender.send(RealtimeEvent {
            topic: topic.to_owned(),
            payload,
        }));
        Ok(())
    }
}
