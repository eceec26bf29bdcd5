//! Command-boundary errors
//!
//! Everything here is recovered at the command boundary: the handler maps
//! the error to its one user-visible message and the process carries on.

use crate::messages;
use crate::notify::NotifyError;
use shamewall_core::CoreError;
use shamewall_store::DirectoryError;

/// Bot error type
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// Caller-side validation failure (bad amount, empty name)
    #[error("validation failed: {0}")]
    Validation(&'static str),

    /// No channel configured for the server
    #[error("no channel configured")]
    NoChannelConfigured,

    /// Core condition or store failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Outbound delivery failure
    #[error("notification failed: {0}")]
    Notify(#[from] NotifyError),

    /// Channel directory failure
    #[error("directory failed: {0}")]
    Directory(#[from] DirectoryError),
}

impl BotError {
    /// The single user-visible message for this condition.
    ///
    /// Infrastructure faults (store, delivery, directory) all surface the
    /// same generic failure string; their detail goes to the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => (*message).to_owned(),
            Self::NoChannelConfigured => messages::NO_CHANNEL_CONFIGURED.to_owned(),
            Self::Core(CoreError::NotFound(name)) => messages::user_not_found(name),
            Self::Core(CoreError::NoOpZero(name)) => messages::no_fails_to_remove(name),
            Self::Core(CoreError::EmptyLeaderboard) => messages::EMPTY_LEADERBOARD.to_owned(),
            Self::Core(CoreError::Unauthorized) => messages::UNAUTHORIZED_PAGINATION.to_owned(),
            Self::Core(CoreError::SessionExpired) => messages::PAGINATION_EXPIRED.to_owned(),
            Self::Core(CoreError::Store(_)) | Self::Notify(_) | Self::Directory(_) => {
                messages::GENERIC_ERROR.to_owned()
            }
        }
    }
}
