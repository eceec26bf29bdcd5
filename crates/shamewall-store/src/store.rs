//! The record-store seam
//!
//! The ledger and leaderboard never talk to a database directly; they go
//! through `RecordStore`. Implementations decide where records live (an
//! in-memory map here, SQLite in a deployment). All methods may suspend.

use crate::ids::ServerId;
use crate::record::ParticipantRecord;

/// Persistence failures, surfaced to invokers as a generic error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend rejected or lost the operation
    #[error("store backend failure: {0}")]
    Backend(String),

    /// Underlying I/O failure
    #[error("store i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Keyed persistence for participant records
///
/// Name matching is case-insensitive everywhere; the persisted name keeps
/// the casing from first creation. Read-modify-write cycles are NOT
/// serialized per record by this trait (see the concurrency notes in the
/// ledger), so two concurrent writers may lose an update.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Find the record for `(server, name)` or create it with a zero counter.
    ///
    /// Returns the record and whether it was freshly created.
    async fn find_or_create(
        &self,
        server: &ServerId,
        name: &str,
    ) -> Result<(ParticipantRecord, bool), StoreError>;

    /// Find the record for `(server, name)`, if any
    async fn find_one(
        &self,
        server: &ServerId,
        name: &str,
    ) -> Result<Option<ParticipantRecord>, StoreError>;

    /// All records for a server, sorted by `fail_count` descending.
    ///
    /// Ordering among equal counts is unspecified here; callers wanting a
    /// stable view apply their own tie-break.
    async fn find_all_sorted(&self, server: &ServerId) -> Result<Vec<ParticipantRecord>, StoreError>;

    /// Upsert a record under its case-insensitive key
    async fn save(&self, record: &ParticipantRecord) -> Result<(), StoreError>;
}
