//! Key-value persistence boundary
//!
//! Stores see the device storage as string keys mapped to string values.
//! [`KeyValueStore`] is the raw boundary that backends implement;
//! [`LocalStore`] layers typed collection reads/writes and per-key locking
//! on top of it and is what the account and task stores hold.

mod file;
mod local;
mod locks;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileKeyValueStore;
pub use local::LocalStore;
pub use memory::MemoryKeyValueStore;

/// Failure of the underlying storage device or backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Raw key-value storage
///
/// Backends hold no domain logic: values are opaque strings.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key is unset
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Create or overwrite a value
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value; removing an unset key succeeds
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
