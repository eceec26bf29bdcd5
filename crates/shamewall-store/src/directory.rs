//! Per-server notification channel directory
//!
//! Each server configures one text channel the bot posts to (the original
//! `/startup` flow). The directory is a plain key-value mapping with
//! explicit get/set/remove, injected wherever the channel is needed so the
//! commands never touch file I/O themselves.

use crate::ids::{ChannelId, ServerId};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Directory persistence failures
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// File could not be read or written
    #[error("directory i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// Stored file is not valid JSON of the expected shape
    #[error("directory file malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Server-to-channel mapping
pub trait ChannelDirectory: Send + Sync {
    /// Channel configured for a server, if any
    fn get(&self, server: &ServerId) -> Result<Option<ChannelId>, DirectoryError>;

    /// Set (or replace) the channel for a server
    fn set(&self, server: &ServerId, channel: &ChannelId) -> Result<(), DirectoryError>;

    /// Remove the mapping for a server; returns whether one existed
    fn remove(&self, server: &ServerId) -> Result<bool, DirectoryError>;
}

/// In-memory directory for tests and the demo binary
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    inner: DashMap<ServerId, ChannelId>,
}

impl MemoryDirectory {
    /// Create an empty directory
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChannelDirectory for MemoryDirectory {
    fn get(&self, server: &ServerId) -> Result<Option<ChannelId>, DirectoryError> {
        Ok(self.inner.get(server).map(|c| c.clone()))
    }

    fn set(&self, server: &ServerId, channel: &ChannelId) -> Result<(), DirectoryError> {
        self.inner.insert(server.clone(), channel.clone());
        Ok(())
    }

    fn remove(&self, server: &ServerId) -> Result<bool, DirectoryError> {
        Ok(self.inner.remove(server).is_some())
    }
}

/// JSON-file-backed directory
///
/// Stores a flat `{ "<server id>": "<channel id>" }` object, pretty-printed.
/// A missing file reads as an empty mapping. Every mutation rewrites the
/// whole file; the mapping stays small (one entry per server).
#[derive(Debug)]
pub struct JsonFileDirectory {
    path: PathBuf,
}

impl JsonFileDirectory {
    /// Use (or create on first write) the file at `path`
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file location
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, DirectoryError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn persist(&self, mapping: &BTreeMap<String, String>) -> Result<(), DirectoryError> {
        let data = serde_json::to_string_pretty(mapping)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

impl ChannelDirectory for JsonFileDirectory {
    fn get(&self, server: &ServerId) -> Result<Option<ChannelId>, DirectoryError> {
        let mapping = self.load()?;
        Ok(mapping
            .get(server.as_str())
            .map(|id| ChannelId::new(id.clone())))
    }

    fn set(&self, server: &ServerId, channel: &ChannelId) -> Result<(), DirectoryError> {
        let mut mapping = self.load()?;
        let previous = mapping.insert(server.to_string(), channel.to_string());
        if previous.as_deref() == Some(channel.as_str()) {
            tracing::debug!(server = %server, channel = %channel, "channel already configured");
            return Ok(());
        }
        self.persist(&mapping)?;
        tracing::info!(server = %server, channel = %channel, "channel configured");
        Ok(())
    }

    fn remove(&self, server: &ServerId) -> Result<bool, DirectoryError> {
        let mut mapping = self.load()?;
        let removed = mapping.remove(server.as_str()).is_some();
        if removed {
            self.persist(&mapping)?;
            tracing::info!(server = %server, "channel mapping removed");
        }
        Ok(removed)
    }
}
