//! Participant records
//!
//! One record per (server, participant name) pair. The name is matched
//! case-insensitively but the persisted record keeps the casing it was
//! first created with.

use crate::ids::ServerId;
use serde::{Deserialize, Serialize};

/// A tracked participant and their accumulated failure count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    /// Server the participant belongs to
    pub server_id: ServerId,
    /// Display name, original casing from first creation
    pub name: String,
    /// Accumulated failures, never negative
    pub fail_count: u32,
}

impl ParticipantRecord {
    /// Create a fresh record with a zero counter
    #[inline]
    #[must_use]
    pub fn new(server_id: ServerId, name: impl Into<String>) -> Self {
        Self {
            server_id,
            name: name.into(),
            fail_count: 0,
        }
    }

    /// Storage key for this record
    #[inline]
    #[must_use]
    pub fn key(&self) -> RecordKey {
        RecordKey::new(&self.server_id, &self.name)
    }
}

/// Case-insensitive storage key: (server, lowercased name)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    /// Server component
    pub server_id: ServerId,
    /// Lowercased name component
    pub name_ci: String,
}

impl RecordKey {
    /// Build a key from a server and a raw (possibly mixed-case) name
    #[inline]
    #[must_use]
    pub fn new(server_id: &ServerId, name: &str) -> Self {
        Self {
            server_id: server_id.clone(),
            name_ci: name.to_lowercase(),
        }
    }
}
