//! File-based key-value backend
//!
//! Stores every key in one JSON object on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{KeyValueStore, StorageError};

/// Key-value store persisted as a single JSON file
///
/// The whole map is rewritten on every `set`/`remove`. A write that fails
/// to reach disk is rolled back in memory, so reads never observe data
/// that was not persisted.
pub struct FileKeyValueStore {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory copy of the file contents
    cache: RwLock<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// Open the store at `path`
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    StorageError::Backend(format!(
                        "Failed to parse storage file {}: {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            BTreeMap::new()
        };

        debug!("Opened storage file {} ({} keys)", path.display(), cache.len());
        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full map to disk
    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(entries).map_err(|e| {
            StorageError::Backend(format!("Failed to serialize storage file: {}", e))
        })?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.cache.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut cache = self.cache.write().await;
        let previous = cache.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&cache).await {
            match previous {
                Some(previous) => cache.insert(key.to_string(), previous),
                None => cache.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut cache = self.cache.write().await;
        let Some(previous) = cache.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.persist(&cache).await {
            cache.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_store() -> (FileKeyValueStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        let store = FileKeyValueStore::open(&path).await.unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_missing_file_opens_empty() {
        let (store, _temp) = create_test_store().await;
        assert!(store.get("users").await.unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("storage.json");

        {
            let store = FileKeyValueStore::open(&path).await.unwrap();
            store.set("userToken", "alice@example.com").await.unwrap();
            store.set("users", "[]").await.unwrap();
            store.remove("users").await.unwrap();
        }

        {
            let store = FileKeyValueStore::open(&path).await.unwrap();
            assert_eq!(
                store.get("userToken").await.unwrap().as_deref(),
                Some("alice@example.com")
            );
            assert!(store.get("users").await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_blank_file_opens_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        tokio::fs::write(&path, "  \n").await.unwrap();

        let store = FileKeyValueStore::open(&path).await.unwrap();
        assert!(store.get("users").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_file_fails_to_open() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        match FileKeyValueStore::open(&path).await {
            Err(StorageError::Backend(msg)) => assert!(msg.contains("Failed to parse")),
            Err(e) => panic!("Expected Backend error, got: {:?}", e),
            Ok(_) => panic!("Expected malformed file to be rejected"),
        }
    }

    #[tokio::test]
    async fn test_failed_write_is_rolled_back() {
        let temp_dir = TempDir::new().unwrap();
        // The parent "directory" is a regular file, so every write fails.
        let blocker = temp_dir.path().join("blocker");
        tokio::fs::write(&blocker, "").await.unwrap();
        let store = FileKeyValueStore::open(blocker.join("storage.json"))
            .await
            .unwrap();

        assert!(store.set("users", "[]").await.is_err());
        assert!(store.get("users").await.unwrap().is_none());
    }
}
