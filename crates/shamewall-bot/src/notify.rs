//! Notification channel seam
//!
//! The bot produces payloads; delivery belongs to whatever platform client
//! is wired in. `BufferNotifier` records everything for tests, and
//! `StdoutNotifier` prints payloads for the demo binary.

use dashmap::DashMap;
use parking_lot::Mutex;
use shamewall_core::RenderedPage;
use shamewall_store::{ChannelId, MessageId};
use std::sync::atomic::{AtomicU64, Ordering};

/// Delivery failures
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The target channel or message no longer exists
    #[error("delivery target unavailable: {0}")]
    TargetUnavailable(String),

    /// Transport-level failure
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}

/// A formatted payload ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Plain text notification
    Text(String),
    /// A rendered leaderboard page, with or without navigation controls
    Board {
        /// The formatted page
        page: RenderedPage,
        /// Whether previous/next controls are attached
        controls: bool,
    },
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Text(text) => write!(f, "{text}"),
            Payload::Board { page, controls } => {
                write!(f, "{page}")?;
                if *controls {
                    write!(f, "\n[◀️ Précédent | ▶️ Suivant]")?;
                }
                Ok(())
            }
        }
    }
}

/// Outbound message delivery
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a payload to a channel; returns the delivered message's id
    async fn send(&self, channel: &ChannelId, payload: Payload) -> Result<MessageId, NotifyError>;

    /// Replace the payload of an already-delivered message
    async fn edit(&self, message: &MessageId, payload: Payload) -> Result<(), NotifyError>;

    /// Strip the navigation controls from a delivered message, leaving its
    /// content in place (the terminal action of a pagination session)
    async fn disable_controls(&self, message: &MessageId) -> Result<(), NotifyError>;
}

/// A delivered message as the buffer notifier remembers it
#[derive(Debug, Clone)]
pub struct Delivered {
    /// Channel the message went to
    pub channel: ChannelId,
    /// Current payload (after any edits)
    pub payload: Payload,
    /// Whether navigation controls are still attached
    pub controls_active: bool,
}

/// In-memory notifier that records every delivery
#[derive(Debug, Default)]
pub struct BufferNotifier {
    next_id: AtomicU64,
    messages: DashMap<MessageId, Delivered>,
    log: Mutex<Vec<MessageId>>,
}

impl BufferNotifier {
    /// Create an empty buffer
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The message most recently sent (not edited)
    #[must_use]
    pub fn last_sent(&self) -> Option<MessageId> {
        self.log.lock().last().cloned()
    }

    /// Snapshot of a delivered message
    #[must_use]
    pub fn message(&self, id: &MessageId) -> Option<Delivered> {
        self.messages.get(id).map(|m| m.clone())
    }

    /// Number of messages sent
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.log.lock().len()
    }
}

#[async_trait::async_trait]
impl Notifier for BufferNotifier {
    async fn send(&self, channel: &ChannelId, payload: Payload) -> Result<MessageId, NotifyError> {
        let id = MessageId::new(format!("msg-{}", self.next_id.fetch_add(1, Ordering::Relaxed)));
        let controls_active = matches!(payload, Payload::Board { controls: true, .. });
        self.messages.insert(
            id.clone(),
            Delivered {
                channel: channel.clone(),
                payload,
                controls_active,
            },
        );
        self.log.lock().push(id.clone());
        Ok(id)
    }

    async fn edit(&self, message: &MessageId, payload: Payload) -> Result<(), NotifyError> {
        let mut entry = self
            .messages
            .get_mut(message)
            .ok_or_else(|| NotifyError::TargetUnavailable(message.to_string()))?;
        entry.controls_active = matches!(payload, Payload::Board { controls: true, .. });
        entry.payload = payload;
        Ok(())
    }

    async fn disable_controls(&self, message: &MessageId) -> Result<(), NotifyError> {
        let mut entry = self
            .messages
            .get_mut(message)
            .ok_or_else(|| NotifyError::TargetUnavailable(message.to_string()))?;
        entry.controls_active = false;
        if let Payload::Board { controls, .. } = &mut entry.payload {
            *controls = false;
        }
        Ok(())
    }
}

/// Notifier that prints payloads, for the demo binary
#[derive(Debug, Default)]
pub struct StdoutNotifier {
    inner: BufferNotifier,
}

impl StdoutNotifier {
    /// Create a printing notifier
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The message most recently sent
    #[must_use]
    pub fn last_sent(&self) -> Option<MessageId> {
        self.inner.last_sent()
    }
}

#[async_trait::async_trait]
impl Notifier for StdoutNotifier {
    async fn send(&self, channel: &ChannelId, payload: Payload) -> Result<MessageId, NotifyError> {
        println!("[#{channel}]\n{payload}\n");
        self.inner.send(channel, payload).await
    }

    async fn edit(&self, message: &MessageId, payload: Payload) -> Result<(), NotifyError> {
        println!("[edit {message}]\n{payload}\n");
        self.inner.edit(message, payload).await
    }

    async fn disable_controls(&self, message: &MessageId) -> Result<(), NotifyError> {
        println!("[edit {message}] controls disabled\n");
        self.inner.disable_controls(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn buffer_records_sends_and_edits() {
        let notifier = BufferNotifier::new();
        let channel = ChannelId::new("c1");

        let id = notifier
            .send(&channel, Payload::Text("bonjour".into()))
            .await
            .unwrap();
        assert_eq!(notifier.last_sent(), Some(id.clone()));

        notifier
            .edit(&id, Payload::Text("rebonjour".into()))
            .await
            .unwrap();
        let delivered = notifier.message(&id).unwrap();
        assert_eq!(delivered.payload, Payload::Text("rebonjour".into()));
        assert_eq!(notifier.sent_count(), 1);
    }

    #[tokio::test]
    async fn edit_unknown_message_fails() {
        let notifier = BufferNotifier::new();
        let result = notifier
            .edit(&MessageId::new("ghost"), Payload::Text("x".into()))
            .await;
        assert!(matches!(result, Err(NotifyError::TargetUnavailable(_))));
    }
}
