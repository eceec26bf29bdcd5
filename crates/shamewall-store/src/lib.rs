//! Shamewall Store - keyed persistence abstractions
//!
//! Defines the storage seams the ledger and leaderboard work against:
//! - Identity newtypes shared across the workspace
//! - Participant records and their case-insensitive keys
//! - The `RecordStore` trait plus an in-memory reference implementation
//! - The `ChannelDirectory` key-value abstraction for per-server
//!   notification channels

#![warn(unreachable_pub)]

pub mod directory;
pub mod ids;
pub mod memory;
pub mod record;
pub mod store;

pub use directory::{ChannelDirectory, DirectoryError, JsonFileDirectory, MemoryDirectory};
pub use ids::{ChannelId, MessageId, ServerId, UserId};
pub use memory::MemoryStore;
pub use record::{ParticipantRecord, RecordKey};
pub use store::{RecordStore, StoreError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
