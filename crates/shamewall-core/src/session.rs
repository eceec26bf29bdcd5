//! Pagination sessions
//!
//! One short-lived session per rendered leaderboard message, holding only
//! a page cursor. Sessions are kept in an in-memory registry keyed by
//! message identity, with a scheduled expiry task tied 1:1 to each
//! session's lifetime. Expiry is the only terminal path: it is a fixed
//! wall-clock duration from creation and is not extended by activity.
//! A process restart orphans live sessions, which is acceptable since a
//! session only controls an already-delivered message.

use crate::error::CoreError;
use dashmap::DashMap;
use shamewall_store::{MessageId, UserId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Fixed session lifetime
pub const SESSION_TTL: Duration = Duration::from_secs(60);

/// Navigation requests accepted while a session is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    /// Move one page back
    Previous,
    /// Move one page forward
    Next,
}

/// Session lifecycle, derived from registry membership: a session is
/// `Active` while it lives in the registry and `Expired` once removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting navigation from the owner
    Active,
    /// Terminal; all navigation rejected
    Expired,
}

/// Cursor state bound to one rendered message
#[derive(Debug, Clone)]
pub struct PaginationSession {
    /// Message the session controls
    pub message_id: MessageId,
    /// Only this user may navigate
    pub owner: UserId,
    /// Zero-based page cursor
    pub current_page: usize,
    /// Page count of the rendered board
    pub total_pages: usize,
}

impl PaginationSession {
    fn new(message_id: MessageId, owner: UserId, total_pages: usize) -> Self {
        Self {
            message_id,
            owner,
            current_page: 0,
            total_pages,
        }
    }

    /// Apply a navigation request, clamping at the page bounds.
    ///
    /// Boundary requests (previous on page 0, next on the last page) leave
    /// the cursor unchanged; the caller still re-renders.
    fn navigate(&mut self, direction: NavDirection) -> usize {
        match direction {
            NavDirection::Previous if self.current_page > 0 => self.current_page -= 1,
            NavDirection::Next if self.current_page + 1 < self.total_pages => {
                self.current_page += 1;
            }
            NavDirection::Previous | NavDirection::Next => {}
        }
        self.current_page
    }
}

/// In-memory registry of live pagination sessions
///
/// Opening a session schedules its expiry task; when the timer elapses the
/// session is dropped from the registry and its message id is emitted on
/// the expiry channel so the caller can disable the message's controls.
pub struct SessionRegistry {
    ttl: Duration,
    sessions: DashMap<MessageId, PaginationSession>,
    expiry_tx: mpsc::Sender<MessageId>,
}

impl SessionRegistry {
    /// Registry with the standard 60 s lifetime.
    ///
    /// Returns the registry and the receiving end of the expiry channel.
    #[must_use]
    pub fn new() -> (Arc<Self>, mpsc::Receiver<MessageId>) {
        Self::with_ttl(SESSION_TTL)
    }

    /// Registry with a custom lifetime (shortened in tests)
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> (Arc<Self>, mpsc::Receiver<MessageId>) {
        let (expiry_tx, expiry_rx) = mpsc::channel(64);
        let registry = Arc::new(Self {
            ttl,
            sessions: DashMap::new(),
            expiry_tx,
        });
        (registry, expiry_rx)
    }

    /// Open a session for a rendered message.
    ///
    /// Returns `false` without opening anything when the board fits on a
    /// single page (no navigation to offer). Otherwise the session starts
    /// at page 0 and its expiry task is scheduled.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(self: &Arc<Self>, message_id: MessageId, owner: UserId, total_pages: usize) -> bool {
        if total_pages <= 1 {
            return false;
        }

        let session = PaginationSession::new(message_id.clone(), owner, total_pages);
        self.sessions.insert(message_id.clone(), session);
        tracing::info!(message = %message_id, total_pages, "pagination session opened");

        let registry = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(registry.ttl).await;
            registry.expire(&message_id).await;
        });
        true
    }

    /// Apply a navigation event against a session.
    ///
    /// Returns the cursor after the event (possibly unchanged at a page
    /// boundary) so the caller can re-render.
    ///
    /// # Errors
    /// - `CoreError::SessionExpired` if no live session exists for the message
    /// - `CoreError::Unauthorized` if `requester` is not the session owner;
    ///   the session is left untouched
    pub fn navigate(
        &self,
        message_id: &MessageId,
        requester: &UserId,
        direction: NavDirection,
    ) -> Result<usize, CoreError> {
        let Some(mut session) = self.sessions.get_mut(message_id) else {
            tracing::info!(message = %message_id, "navigation on expired session");
            return Err(CoreError::SessionExpired);
        };

        if session.owner != *requester {
            tracing::warn!(
                message = %message_id,
                requester = %requester,
                "unauthorized pagination attempt"
            );
            return Err(CoreError::Unauthorized);
        }

        let page = session.navigate(direction);
        tracing::info!(
            message = %message_id,
            page = page + 1,
            total = session.total_pages,
            "pagination cursor moved"
        );
        Ok(page)
    }

    /// Whether a live session exists for a message
    #[inline]
    #[must_use]
    pub fn is_active(&self, message_id: &MessageId) -> bool {
        self.sessions.contains_key(message_id)
    }

    /// Lifecycle state for a message: `Active` while the session lives in
    /// the registry, `Expired` for dropped or never-opened sessions
    #[inline]
    #[must_use]
    pub fn state_of(&self, message_id: &MessageId) -> SessionState {
        if self.sessions.contains_key(message_id) {
            SessionState::Active
        } else {
            SessionState::Expired
        }
    }

    /// Number of live sessions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are live
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    async fn expire(&self, message_id: &MessageId) {
        if self.sessions.remove(message_id).is_some() {
            tracing::info!(message = %message_id, "pagination session expired");
            // Receiver gone means nobody is left to disable controls
            let _ = self.expiry_tx.send(message_id.clone()).await;
        }
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("ttl", &self.ttl)
            .field("live", &self.sessions.len())
            .finish_non_exhaustive()
    }
}
