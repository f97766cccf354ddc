//! NoteStore - single source of truth for the note collection
//!
//! The collection is persisted as one JSON array under one key of a
//! [`KeyValueStore`]. Every mutation is a whole-collection read-modify-write:
//!
//! 1. read the stored array (never the in-memory copy)
//! 2. apply the change
//! 3. write the whole array back
//! 4. re-read storage into the in-memory list
//!
//! The in-memory list lives behind a `tokio::sync::Mutex` that is held for the
//! full cycle, so two overlapping calls on the same store cannot interleave
//! their writes and lose data. After any operation returns, the in-memory list
//! equals what storage holds.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::db::{KeyValueStore, StorageError};
use crate::models::{Note, NoteDraft, NoteFilter, NoteId, ReferenceData};
use crate::services::{ClearConfirmer, ClearOutcome, ClearScope, ConfirmPrompt, NoteStoreError};

/// Storage key holding the serialized collection
pub const DEFAULT_NOTES_KEY: &str = "NOTES";

pub struct NoteStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    reference: ReferenceData,
    clear_scope: ClearScope,
    notes: Mutex<Vec<Note>>,
}

impl NoteStore {
    /// Create a store with an empty in-memory list.
    ///
    /// Nothing is read until [`list_all`](Self::list_all) is called; use
    /// [`open`](Self::open) to get a store that is already loaded.
    pub fn new(backend: Arc<dyn KeyValueStore>, reference: ReferenceData) -> Self {
        Self {
            backend,
            key: DEFAULT_NOTES_KEY.to_string(),
            reference,
            clear_scope: ClearScope::default(),
            notes: Mutex::new(Vec::new()),
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_clear_scope(mut self, scope: ClearScope) -> Self {
        self.clear_scope = scope;
        self
    }

    /// Create a store and load the collection from `backend`
    pub async fn open(
        backend: Arc<dyn KeyValueStore>,
        reference: ReferenceData,
    ) -> Result<Self, NoteStoreError> {
        let store = Self::new(backend, reference);
        store.list_all().await?;
        Ok(store)
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn clear_scope(&self) -> ClearScope {
        self.clear_scope
    }

    //
    // IN-MEMORY VIEW
    //

    /// Snapshot of the in-memory list (no storage access)
    pub async fn notes(&self) -> Vec<Note> {
        self.notes.lock().await.clone()
    }

    pub async fn find(&self, id: NoteId) -> Option<Note> {
        self.notes.lock().await.iter().find(|n| n.id == id).cloned()
    }

    pub async fn filter(&self, filter: &NoteFilter) -> Vec<Note> {
        self.notes
            .lock()
            .await
            .iter()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect()
    }

    //
    // OPERATIONS
    //

    /// Reload the collection from storage and return it.
    ///
    /// # Errors
    ///
    /// `StorageRead` if the backend fails, the stored value is not a note
    /// array, or a stored note has a duplicate id or an empty field. The
    /// in-memory list keeps its previous contents in that case.
    pub async fn list_all(&self) -> Result<Vec<Note>, NoteStoreError> {
        let mut notes = self.notes.lock().await;
        let stored = self.read_collection().await?;
        tracing::debug!("Loaded {} notes from '{}'", stored.len(), self.key);
        *notes = stored;
        Ok(notes.clone())
    }

    /// Validate `draft`, give it a fresh id and append it to the collection.
    ///
    /// # Errors
    ///
    /// - `Validation` - nothing is read or written
    /// - `StorageRead` / `StorageWrite` - the stored collection is unchanged
    pub async fn create(&self, draft: &NoteDraft) -> Result<Note, NoteStoreError> {
        let fields = draft.validate(&self.reference)?;

        let mut notes = self.notes.lock().await;
        let mut collection = self.read_collection().await?;

        let note = Note::from_validated(next_note_id(&collection), fields);
        collection.push(note.clone());

        self.write_collection(&collection).await?;
        self.refresh(&mut notes, collection).await;

        tracing::debug!("Created note {}", note.id);
        Ok(note)
    }

    /// Replace text, category and client of note `id`, keeping the id.
    ///
    /// # Errors
    ///
    /// - `Validation` - nothing is read or written
    /// - `NotFound` - no note with `id` is stored; nothing is written
    /// - `StorageRead` / `StorageWrite` - the stored collection is unchanged
    pub async fn update(&self, id: NoteId, draft: &NoteDraft) -> Result<Note, NoteStoreError> {
        let fields = draft.validate(&self.reference)?;

        let mut notes = self.notes.lock().await;
        let mut collection = self.read_collection().await?;

        let Some(index) = collection.iter().position(|n| n.id == id) else {
            // keep memory in line with what was just read
            *notes = collection;
            return Err(NoteStoreError::not_found(id));
        };
        collection[index].apply(fields);
        let updated = collection[index].clone();

        self.write_collection(&collection).await?;
        self.refresh(&mut notes, collection).await;

        tracing::debug!("Updated note {}", id);
        Ok(updated)
    }

    /// Remove note `id`. Deleting an absent id is a no-op, not an error.
    ///
    /// Returns whether a note was removed.
    pub async fn delete(&self, id: NoteId) -> Result<bool, NoteStoreError> {
        let mut notes = self.notes.lock().await;
        let mut collection = self.read_collection().await?;

        let before = collection.len();
        collection.retain(|n| n.id != id);
        if collection.len() == before {
            tracing::debug!("Delete of note {} skipped, not stored", id);
            *notes = collection;
            return Ok(false);
        }

        self.write_collection(&collection).await?;
        self.refresh(&mut notes, collection).await;

        tracing::debug!("Deleted note {}", id);
        Ok(true)
    }

    /// Erase all notes after `confirmer` agrees.
    ///
    /// With [`ClearScope::Namespace`] this wipes every key in the backend, not
    /// just the note collection. It cannot be undone.
    pub async fn clear_all(
        &self,
        confirmer: &dyn ClearConfirmer,
    ) -> Result<ClearOutcome, NoteStoreError> {
        if !confirmer.confirm(&ConfirmPrompt::CLEAR_ALL).await {
            tracing::debug!("Clear all cancelled");
            return Ok(ClearOutcome::Cancelled);
        }

        let mut notes = self.notes.lock().await;
        let cleared = match self.clear_scope {
            ClearScope::Namespace => self.backend.clear().await,
            ClearScope::NotesOnly => self.backend.remove(&self.key).await,
        };
        cleared.map_err(NoteStoreError::storage_write)?;

        self.refresh(&mut notes, Vec::new()).await;
        tracing::info!("Cleared all notes (scope: {})", self.clear_scope);
        Ok(ClearOutcome::Cleared)
    }

    //
    // STORAGE
    //

    async fn read_collection(&self) -> Result<Vec<Note>, NoteStoreError> {
        let stored = self
            .backend
            .get(&self.key)
            .await
            .map_err(NoteStoreError::storage_read)?;

        let Some(json) = stored else {
            return Ok(Vec::new());
        };
        let collection: Vec<Note> =
            serde_json::from_str(&json).map_err(NoteStoreError::storage_read)?;
        check_collection(&collection).map_err(NoteStoreError::storage_read)?;
        Ok(collection)
    }

    async fn write_collection(&self, collection: &[Note]) -> Result<(), NoteStoreError> {
        let json = serde_json::to_string(collection).map_err(NoteStoreError::storage_write)?;
        self.backend
            .set(&self.key, json)
            .await
            .map_err(NoteStoreError::storage_write)
    }

    /// Read-after-write: load what storage now holds into memory.
    ///
    /// The write already succeeded, so a failing re-read is not reported to the
    /// caller; memory takes the collection that was written instead.
    async fn refresh(&self, notes: &mut MutexGuard<'_, Vec<Note>>, written: Vec<Note>) {
        match self.read_collection().await {
            Ok(stored) => **notes = stored,
            Err(e) => {
                tracing::warn!("Refresh after write failed, using written collection: {}", e);
                **notes = written;
            }
        }
    }
}

/// Stored notes must have distinct ids and non-empty text, category and client
fn check_collection(notes: &[Note]) -> Result<(), StorageError> {
    let mut seen = HashSet::with_capacity(notes.len());
    for note in notes {
        if !seen.insert(note.id) {
            return Err(StorageError::backend(format!("duplicate note id {}", note.id)));
        }
        let empty_field = [
            ("text", &note.text),
            ("category", &note.category),
            ("client", &note.client),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());
        if let Some((field, _)) = empty_field {
            return Err(StorageError::backend(format!(
                "note {} has an empty {}",
                note.id, field
            )));
        }
    }
    Ok(())
}

/// One above the largest stored id, stepping forward past any taken id
fn next_note_id(existing: &[Note]) -> NoteId {
    let taken: HashSet<NoteId> = existing.iter().map(|n| n.id).collect();
    let mut candidate = existing
        .iter()
        .map(|n| n.id)
        .max()
        .map_or(1, |max| max.saturating_add(1))
        .max(1);

    while taken.contains(&candidate) {
        candidate = if candidate == NoteId::MAX { 1 } else { candidate + 1 };
    }
    candidate
}
