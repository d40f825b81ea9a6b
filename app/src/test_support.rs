//! Storage backends with injected failures

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use todo_core::storage::{KeyValueStore, MemoryKeyValueStore, StorageError};

/// Memory backend whose reads fail until `fail_reads` is cleared
pub struct FailingReads {
    pub inner: MemoryKeyValueStore,
    pub fail_reads: AtomicBool,
}

impl Default for FailingReads {
    fn default() -> Self {
        Self {
            inner: MemoryKeyValueStore::new(),
            fail_reads: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl KeyValueStore for FailingReads {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("read failed".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}

/// Memory backend whose writes always fail
#[derive(Default)]
pub struct FailingWrites {
    pub inner: MemoryKeyValueStore,
}

#[async_trait]
impl KeyValueStore for FailingWrites {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("device full".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("device full".to_string()))
    }
}
