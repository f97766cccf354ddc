//! Persistence Backend Error Types
//!
//! Errors raised by `KeyValueStore` implementations. The service layer wraps
//! them as read or write failures depending on which call failed.

use thiserror::Error;

/// Key-value backend errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem operation failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be (de)serialized
    #[error("Storage serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-specific failure with context
    #[error("Storage backend failed: {0}")]
    Backend(String),
}

impl StorageError {
    /// Create a backend error with context
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
