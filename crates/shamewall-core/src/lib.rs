//! Shamewall Core - failure ledger and ranked leaderboard
//!
//! The state-transition heart of the bot:
//! - Bounded increments/decrements of per-participant failure counters,
//!   with milestone-crossing detection
//! - Static milestone/title threshold tables
//! - Ranked, paginated leaderboard rendering
//! - Time-bounded pagination sessions, one per rendered message
//!
//! # Example
//!
//! ```rust,ignore
//! use shamewall_core::LedgerEngine;
//! use shamewall_store::{MemoryStore, ServerId};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ledger = LedgerEngine::new(Arc::new(MemoryStore::new()));
//! let outcome = ledger.increment(&ServerId::new("g1"), "Osamodas", 2).await?;
//! println!("{} -> {}", outcome.old_count, outcome.new_count);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod leaderboard;
pub mod ledger;
pub mod session;
pub mod tables;

pub use error::CoreError;
pub use leaderboard::{
    title_for, BoardEntry, RankedBoard, RenderedPage, BOARD_TITLE, FALLBACK_TITLE, PAGE_SIZE,
};
pub use ledger::{DecrementOutcome, IncrementOutcome, LedgerEngine, Milestone};
pub use session::{NavDirection, PaginationSession, SessionRegistry, SessionState, SESSION_TTL};
pub use tables::{ThresholdTable, MILESTONES, TITLES};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
