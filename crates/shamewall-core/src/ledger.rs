//! Ledger engine
//!
//! Applies bounded increments/decrements to a participant's failure
//! counter through the record store, and detects milestone crossings.
//! Every operation is a single read-modify-write against one record.
//!
//! # Concurrency
//!
//! Operations are not mutually exclusive across concurrent invocations on
//! the same participant: two racing increments may lose an update at the
//! read-modify-write step. This mirrors the observed behavior of the
//! system being reimplemented; callers run on a single-threaded event loop
//! where the race does not arise in practice.

use crate::error::CoreError;
use crate::tables::{ThresholdTable, MILESTONES};
use shamewall_store::{RecordStore, ServerId};
use std::sync::Arc;

/// A milestone crossed by an increment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    /// Failure-count threshold
    pub threshold: u32,
    /// Celebratory message for the threshold
    pub message: String,
}

/// Result of a successful increment
#[derive(Debug, Clone)]
pub struct IncrementOutcome {
    /// Persisted name (original casing)
    pub name: String,
    /// Counter before the increment
    pub old_count: u32,
    /// Counter after the increment
    pub new_count: u32,
    /// Milestones crossed, ascending by threshold
    pub crossed_milestones: Vec<Milestone>,
}

/// Result of a successful decrement
#[derive(Debug, Clone)]
pub struct DecrementOutcome {
    /// Persisted name (original casing)
    pub name: String,
    /// Counter before the decrement
    pub old_count: u32,
    /// Counter after the decrement, floored at zero
    pub new_count: u32,
    /// Failures actually removed (`old_count - new_count`)
    pub removed: u32,
}

/// Applies counter mutations and detects milestone crossings
pub struct LedgerEngine {
    store: Arc<dyn RecordStore>,
    milestones: ThresholdTable,
}

impl LedgerEngine {
    /// Create an engine over a store, using the builtin milestone table
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_milestones(store, MILESTONES.clone())
    }

    /// Create an engine with a custom milestone table
    #[inline]
    #[must_use]
    pub fn with_milestones(store: Arc<dyn RecordStore>, milestones: ThresholdTable) -> Self {
        Self { store, milestones }
    }

    /// Add `amount` failures to a participant, creating the record on
    /// first sight.
    ///
    /// `amount` is a precondition: the command layer validates it into
    /// `1..=2` before calling; it is not re-checked here.
    ///
    /// # Errors
    /// - `CoreError::Store` if the read or the write fails
    pub async fn increment(
        &self,
        server: &ServerId,
        name: &str,
        amount: u32,
    ) -> Result<IncrementOutcome, CoreError> {
        debug_assert!((1..=2).contains(&amount));

        let (mut record, created) = self.store.find_or_create(server, name).await?;
        if created {
            tracing::info!(server = %server, name = %record.name, "participant created");
        }

        let old_count = record.fail_count;
        record.fail_count += amount;
        self.store.save(&record).await?;

        let crossed_milestones: Vec<Milestone> = self
            .milestones
            .crossed(old_count, record.fail_count)
            .into_iter()
            .map(|(threshold, message)| Milestone {
                threshold,
                message: message.to_owned(),
            })
            .collect();

        tracing::info!(
            server = %server,
            name = %record.name,
            old = old_count,
            new = record.fail_count,
            milestones = crossed_milestones.len(),
            "failures added"
        );

        Ok(IncrementOutcome {
            name: record.name,
            old_count,
            new_count: record.fail_count,
            crossed_milestones,
        })
    }

    /// Remove up to `amount` failures from a participant, flooring the
    /// counter at zero.
    ///
    /// Same `amount` precondition as [`Self::increment`].
    ///
    /// # Errors
    /// - `CoreError::NotFound` if the participant was never recorded
    /// - `CoreError::NoOpZero` if the counter is already zero (no write)
    /// - `CoreError::Store` if the read or the write fails
    pub async fn decrement(
        &self,
        server: &ServerId,
        name: &str,
        amount: u32,
    ) -> Result<DecrementOutcome, CoreError> {
        debug_assert!((1..=2).contains(&amount));

        let Some(mut record) = self.store.find_one(server, name).await? else {
            tracing::info!(server = %server, name, "decrement on unknown participant");
            return Err(CoreError::NotFound(name.to_owned()));
        };

        if record.fail_count == 0 {
            tracing::info!(server = %server, name = %record.name, "decrement on zero counter");
            return Err(CoreError::NoOpZero(record.name));
        }

        let old_count = record.fail_count;
        record.fail_count = old_count.saturating_sub(amount);
        self.store.save(&record).await?;

        tracing::info!(
            server = %server,
            name = %record.name,
            old = old_count,
            new = record.fail_count,
            "failures removed"
        );

        Ok(DecrementOutcome {
            name: record.name,
            old_count,
            new_count: record.fail_count,
            removed: old_count - record.fail_count,
        })
    }

    /// The store this engine writes through
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }
}

impl std::fmt::Debug for LedgerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerEngine")
            .field("milestones", &self.milestones.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shamewall_store::MemoryStore;

    fn engine() -> LedgerEngine {
        LedgerEngine::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn increment_creates_record_at_zero() {
        let ledger = engine();
        let server = ServerId::new("g1");

        let outcome = ledger.increment(&server, "Osamodas", 1).await.unwrap();
        assert_eq!(outcome.old_count, 0);
        assert_eq!(outcome.new_count, 1);
        assert!(outcome.crossed_milestones.is_empty());
    }

    #[tokio::test]
    async fn increment_matches_case_insensitively() {
        let ledger = engine();
        let server = ServerId::new("g1");

        ledger.increment(&server, "Osamodas", 2).await.unwrap();
        let outcome = ledger.increment(&server, "oSAMODAS", 1).await.unwrap();

        assert_eq!(outcome.old_count, 2);
        assert_eq!(outcome.new_count, 3);
        // Casing from first creation wins
        assert_eq!(outcome.name, "Osamodas");
    }

    #[tokio::test]
    async fn increment_reports_crossed_milestones_ascending() {
        let ledger = engine();
        let server = ServerId::new("g1");

        // Drive the counter to 14, then step over the 15 threshold
        for _ in 0..7 {
            ledger.increment(&server, "Iop", 2).await.unwrap();
        }
        let outcome = ledger.increment(&server, "Iop", 2).await.unwrap();

        assert_eq!(outcome.old_count, 14);
        assert_eq!(outcome.new_count, 16);
        assert_eq!(outcome.crossed_milestones.len(), 1);
        assert_eq!(outcome.crossed_milestones[0].threshold, 15);
    }

    #[tokio::test]
    async fn milestones_never_repeat_across_calls() {
        let ledger = engine();
        let server = ServerId::new("g1");

        let mut seen = Vec::new();
        // 13 two-step increments: 0 -> 26, passing 15 and 25
        for _ in 0..13 {
            let outcome = ledger.increment(&server, "Eca", 2).await.unwrap();
            seen.extend(outcome.crossed_milestones.iter().map(|m| m.threshold));
        }

        assert_eq!(seen, vec![15, 25]);
    }

    #[tokio::test]
    async fn decrement_floors_at_zero() {
        let ledger = engine();
        let server = ServerId::new("g1");

        ledger.increment(&server, "Sram", 1).await.unwrap();
        let outcome = ledger.decrement(&server, "Sram", 2).await.unwrap();

        assert_eq!(outcome.old_count, 1);
        assert_eq!(outcome.new_count, 0);
        assert_eq!(outcome.removed, 1);
    }

    #[tokio::test]
    async fn decrement_unknown_participant_is_not_found() {
        let ledger = engine();
        let result = ledger.decrement(&ServerId::new("g1"), "fantome", 1).await;
        assert!(matches!(result, Err(CoreError::NotFound(name)) if name == "fantome"));
    }

    #[tokio::test]
    async fn decrement_at_zero_is_noop() {
        let ledger = engine();
        let server = ServerId::new("g1");

        ledger.increment(&server, "Feca", 1).await.unwrap();
        ledger.decrement(&server, "Feca", 1).await.unwrap();

        // Counter is now zero: reported as NoOpZero, not NotFound
        let result = ledger.decrement(&server, "Feca", 1).await;
        assert!(matches!(result, Err(CoreError::NoOpZero(_))));

        // And no write happened
        let record = ledger
            .store()
            .find_one(&server, "feca")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.fail_count, 0);
    }

    #[tokio::test]
    async fn servers_are_isolated() {
        let ledger = engine();

        ledger
            .increment(&ServerId::new("g1"), "Enutrof", 2)
            .await
            .unwrap();
        let result = ledger
            .decrement(&ServerId::new("g2"), "Enutrof", 1)
            .await;
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }
}
