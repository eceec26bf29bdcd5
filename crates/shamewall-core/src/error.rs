//! Error taxonomy for the core
//!
//! Every variant except `Store` is a reported, non-fatal condition: the
//! command boundary maps it to one user-visible message and carries on.
//! `Store` wraps persistence faults, which are logged and surfaced as a
//! generic failure.

use shamewall_store::StoreError;

/// Core error type
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Decrement against a participant that was never recorded
    #[error("participant not found: {0}")]
    NotFound(String),

    /// Decrement against a participant whose counter is already zero;
    /// distinct from `NotFound`, and no write is performed
    #[error("participant {0} has no failures to remove")]
    NoOpZero(String),

    /// Leaderboard requested for a server with no recorded participants
    #[error("no participants recorded")]
    EmptyLeaderboard,

    /// Navigation attempt by someone other than the session owner
    #[error("pagination controlled by another user")]
    Unauthorized,

    /// Navigation against an expired (or never-opened) session
    #[error("pagination session expired")]
    SessionExpired,

    /// Persistence layer failure; no partial write is assumed
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Whether this is a reported condition rather than an infrastructure fault
    #[inline]
    #[must_use]
    pub fn is_reported(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reported_conditions_exclude_store_failures() {
        assert!(CoreError::NotFound("x".into()).is_reported());
        assert!(CoreError::NoOpZero("x".into()).is_reported());
        assert!(CoreError::EmptyLeaderboard.is_reported());
        assert!(CoreError::Unauthorized.is_reported());
        assert!(CoreError::SessionExpired.is_reported());
        assert!(!CoreError::Store(StoreError::Backend("down".into())).is_reported());
    }
}
