//! # shamewall-bot
//!
//! Command layer and delivery seam for the failure ledger:
//!
//! - **bot** — the `Shamewall` command surface (add/remove fails,
//!   leaderboard, pagination, startup, help)
//! - **notify** — the [`Notifier`] trait plus buffer and stdout
//!   implementations
//! - **messages** — every user-visible string, French as shipped
//! - **error** — [`BotError`] and its one-message-per-condition mapping
//!
//! The binary target wires a demo run over the in-memory store.

pub mod bot;
pub mod error;
pub mod messages;
pub mod notify;

pub use bot::{CommandContext, Shamewall};
pub use error::BotError;
pub use notify::{BufferNotifier, Delivered, Notifier, NotifyError, Payload, StdoutNotifier};
