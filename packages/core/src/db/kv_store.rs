//! KeyValueStore Trait - Persistence Backend Abstraction
//!
//! `NoteStore` never touches a storage medium directly. It talks to a
//! `KeyValueStore`: a flat namespace of string keys holding serialized string
//! values, with whole-value reads and writes only.
//!
//! # Backends
//!
//! - [`MemoryStore`](super::MemoryStore) - in-process map, for tests and embedders
//! - [`FileStore`](super::FileStore) - one JSON file on local disk, atomic writes

use async_trait::async_trait;

use crate::db::StorageError;

/// Asynchronous key-value persistence
///
/// Implementations must be `Send + Sync` so stores can be shared through
/// `Arc<dyn KeyValueStore>` across tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if nothing is stored there
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value under `key`
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove `key` from the namespace. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Erase every key in the namespace
    async fn clear(&self) -> Result<(), StorageError>;
}
