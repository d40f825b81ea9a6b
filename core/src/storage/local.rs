//! Typed access to the key-value store

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::OwnedMutexGuard;
use tracing::debug;

use super::locks::KeyLocks;
use super::{KeyValueStore, MemoryKeyValueStore};
use crate::{Error, Result};

/// Shared handle over a key-value backend
///
/// Collections are stored as JSON arrays. Stored values that don't match
/// the expected record shape are reported as [`Error::CorruptData`]
/// instead of being treated as empty. Clones share the backend and the
/// lock registry.
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn KeyValueStore>,
    locks: Arc<KeyLocks>,
}

impl LocalStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            locks: Arc::new(KeyLocks::new()),
        }
    }

    /// Handle over a fresh in-memory backend
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKeyValueStore::new()))
    }

    /// Serialize read-modify-write cycles on `key`
    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        self.locks.lock(key).await
    }

    pub async fn read_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.backend.get(key).await?)
    }

    pub async fn write_value(&self, key: &str, value: &str) -> Result<()> {
        Ok(self.backend.set(key, value).await?)
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        Ok(self.backend.remove(key).await?)
    }

    /// Read the collection stored under `key`; unset means empty
    pub async fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let Some(content) = self.read_value(key).await? else {
            return Ok(Vec::new());
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items: Vec<T> = serde_json::from_str(&content).map_err(|e| Error::CorruptData {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        debug!("Read {} records from '{}'", items.len(), key);
        Ok(items)
    }

    /// Replace the collection stored under `key`
    pub async fn write_collection<T: Serialize + Sync>(&self, key: &str, items: &[T]) -> Result<()> {
        let content = serde_json::to_string(items)?;
        self.write_value(key, &content).await?;
        debug!("Wrote {} records to '{}'", items.len(), key);
        Ok(())
    }
}
