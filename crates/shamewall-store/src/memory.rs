//! In-memory record store
//!
//! Reference implementation backed by a `DashMap`. Used by the demo binary
//! and by every test in the workspace.

use crate::ids::ServerId;
use crate::record::{ParticipantRecord, RecordKey};
use crate::store::{RecordStore, StoreError};
use dashmap::DashMap;

/// Process-lifetime record store
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<RecordKey, ParticipantRecord>,
}

impl MemoryStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records across all servers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore {
    async fn find_or_create(
        &self,
        server: &ServerId,
        name: &str,
    ) -> Result<(ParticipantRecord, bool), StoreError> {
        let key = RecordKey::new(server, name);
        if let Some(existing) = self.records.get(&key) {
            return Ok((existing.clone(), false));
        }

        let record = ParticipantRecord::new(server.clone(), name);
        self.records.insert(key, record.clone());
        tracing::debug!(server = %server, name, "record created");
        Ok((record, true))
    }

    async fn find_one(
        &self,
        server: &ServerId,
        name: &str,
    ) -> Result<Option<ParticipantRecord>, StoreError> {
        let key = RecordKey::new(server, name);
        Ok(self.records.get(&key).map(|r| r.clone()))
    }

    async fn find_all_sorted(&self, server: &ServerId) -> Result<Vec<ParticipantRecord>, StoreError> {
        let mut records: Vec<ParticipantRecord> = self
            .records
            .iter()
            .filter(|entry| entry.server_id == *server)
            .map(|entry| entry.clone())
            .collect();

        records.sort_by(|a, b| b.fail_count.cmp(&a.fail_count));
        Ok(records)
    }

    async fn save(&self, record: &ParticipantRecord) -> Result<(), StoreError> {
        self.records.insert(record.key(), record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn find_or_create_is_case_insensitive() {
        let store = MemoryStore::new();
        let server = ServerId::new("g1");

        let (first, created) = store.find_or_create(&server, "Osamodas").await.unwrap();
        assert!(created);
        assert_eq!(first.fail_count, 0);

        let (again, created) = store.find_or_create(&server, "oSAMODAS").await.unwrap();
        assert!(!created);
        // Casing from first creation is preserved
        assert_eq!(again.name, "Osamodas");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn save_then_find_one() {
        let store = MemoryStore::new();
        let server = ServerId::new("g1");

        let (mut record, _) = store.find_or_create(&server, "Iop").await.unwrap();
        record.fail_count = 7;
        store.save(&record).await.unwrap();

        let found = store.find_one(&server, "IOP").await.unwrap().unwrap();
        assert_eq!(found.fail_count, 7);
    }

    #[tokio::test]
    async fn find_one_missing_is_none() {
        let store = MemoryStore::new();
        let found = store.find_one(&ServerId::new("g1"), "nobody").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn find_all_sorted_descending_and_isolated_per_server() {
        let store = MemoryStore::new();
        let g1 = ServerId::new("g1");
        let g2 = ServerId::new("g2");

        for (name, fails, server) in [
            ("a", 3, &g1),
            ("b", 9, &g1),
            ("c", 1, &g1),
            ("d", 50, &g2),
        ] {
            let (mut record, _) = store.find_or_create(server, name).await.unwrap();
            record.fail_count = fails;
            store.save(&record).await.unwrap();
        }

        let ranked = store.find_all_sorted(&g1).await.unwrap();
        let counts: Vec<u32> = ranked.iter().map(|r| r.fail_count).collect();
        assert_eq!(counts, vec![9, 3, 1]);
    }
}
