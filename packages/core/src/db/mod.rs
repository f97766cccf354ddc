//! Persistence Layer
//!
//! Everything `NoteStore` persists goes through the [`KeyValueStore`] trait.
//! The note collection is one serialized value under one key; backends know
//! nothing about notes.

mod error;
mod file_store;
mod kv_store;
mod memory_store;

pub use error::StorageError;
pub use file_store::FileStore;
#[cfg(test)]
pub use kv_store::MockKeyValueStore;
pub use kv_store::KeyValueStore;
pub use memory_store::MemoryStore;
