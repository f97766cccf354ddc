//! Service Layer Error Types
//!
//! Every `NoteStore` and `NoteForm` operation reports failures through
//! [`NoteStoreError`]. None of them is fatal: the caller decides whether to
//! show a message, retry, or ignore.

use crate::db::StorageError;
use crate::models::{NoteId, ValidationError};
use thiserror::Error;

/// Note store operation errors
#[derive(Error, Debug)]
pub enum NoteStoreError {
    /// Draft is missing a required field or uses an unknown reference value
    #[error("Note validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Operation targets an id that is not in the collection
    #[error("Note not found: {id}")]
    NotFound { id: NoteId },

    /// Backend read failed or returned data that does not parse as notes
    #[error("Failed to read notes from storage: {0}")]
    StorageRead(#[source] StorageError),

    /// Backend write failed; the previous collection is still in place
    #[error("Failed to write notes to storage: {0}")]
    StorageWrite(#[source] StorageError),

    /// `save` was called while no form is open
    #[error("Note form is not open")]
    FormClosed,
}

impl NoteStoreError {
    /// Create a not found error
    pub fn not_found(id: NoteId) -> Self {
        Self::NotFound { id }
    }

    /// Wrap a backend failure that happened while reading
    pub fn storage_read(source: impl Into<StorageError>) -> Self {
        Self::StorageRead(source.into())
    }

    /// Wrap a backend failure that happened while writing
    pub fn storage_write(source: impl Into<StorageError>) -> Self {
        Self::StorageWrite(source.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Storage failures can succeed on a later attempt with the same input
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageRead(_) | Self::StorageWrite(_))
    }
}
