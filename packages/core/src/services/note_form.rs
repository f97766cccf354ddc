//! NoteForm - create/edit form state backed by a NoteStore
//!
//! The form is either closed (`Idle`), open for a new note (`Creating`), or
//! open on an existing note (`Editing(id)`). The draft only exists while the
//! form is open and is discarded when it closes.
//!
//! ```text
//!            open_for_create             save (ok) / cancel
//!   Idle ──────────────────▶ Creating ─────────────────────▶ Idle
//!     │                                                        ▲
//!     │ open_for_edit(id)            save (ok | NotFound)      │
//!     └──────────────────▶ Editing(id) ────────────────────────┘
//! ```
//!
//! Saving while `Editing(id)` always goes through `NoteStore::update`. If the
//! note was deleted after the form opened, the save fails with `NotFound`
//! instead of recreating the note under a stale id.

use crate::models::{Note, NoteDraft, NoteId};
use crate::services::{NoteStore, NoteStoreError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Creating,
    Editing(NoteId),
}

impl FormState {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormState::Idle)
    }
}

#[derive(Debug, Default)]
pub struct NoteForm {
    state: FormState,
    draft: NoteDraft,
}

impl NoteForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    /// Open an empty form for a new note
    pub fn open_for_create(&mut self) {
        self.state = FormState::Creating;
        self.draft = NoteDraft::default();
    }

    /// Open the form on note `id`, pre-filled with its current fields.
    ///
    /// Returns `false` and leaves the form untouched if the note is no longer
    /// in the store (it may have been deleted in the meantime).
    pub async fn open_for_edit(&mut self, store: &NoteStore, id: NoteId) -> bool {
        let Some(note) = store.find(id).await else {
            tracing::debug!("Edit of note {} ignored, not in store", id);
            return false;
        };
        self.state = FormState::Editing(id);
        self.draft = NoteDraft::from_note(&note);
        true
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.draft.category = category;
    }

    pub fn set_client(&mut self, client: Option<String>) {
        self.draft.client = client;
    }

    /// Close the form and drop the draft. Nothing is persisted.
    pub fn cancel(&mut self) {
        self.close();
    }

    /// Persist the draft: `create` when `Creating`, `update` when `Editing`.
    ///
    /// On success, or on `NotFound`, the form closes. On validation or storage
    /// errors it stays open with the draft intact so the input can be fixed or
    /// the save retried.
    pub async fn save(&mut self, store: &NoteStore) -> Result<Note, NoteStoreError> {
        let result = match self.state {
            FormState::Idle => return Err(NoteStoreError::FormClosed),
            FormState::Creating => store.create(&self.draft).await,
            FormState::Editing(id) => store.update(id, &self.draft).await,
        };

        match &result {
            Ok(_) => self.close(),
            Err(e) if e.is_not_found() => {
                tracing::warn!("Edited note vanished before save: {}", e);
                self.close();
            }
            Err(_) => {}
        }
        result
    }

    fn close(&mut self) {
        self.state = FormState::Idle;
        self.draft = NoteDraft::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::ReferenceData;
    use std::sync::Arc;

    async fn create_test_store() -> NoteStore {
        NoteStore::open(
            Arc::new(MemoryStore::new()),
            ReferenceData::from_values(["Errand", "Meeting"], ["Personal", "Acme"]),
        )
        .await
        .unwrap()
    }

    fn fill(form: &mut NoteForm, text: &str, category: &str, client: &str) {
        form.set_text(text);
        form.set_category(Some(category.to_string()));
        form.set_client(Some(client.to_string()));
    }

    #[test]
    fn test_initial_state_is_idle() {
        let form = NoteForm::new();
        assert_eq!(form.state(), FormState::Idle);
        assert!(!form.state().is_open());
        assert_eq!(form.draft(), &NoteDraft::default());
    }

    #[tokio::test]
    async fn test_save_while_idle() {
        let store = create_test_store().await;
        let mut form = NoteForm::new();

        let result = form.save(&store).await;
        assert!(matches!(result, Err(NoteStoreError::FormClosed)));
    }

    #[tokio::test]
    async fn test_create_flow() {
        let store = create_test_store().await;
        let mut form = NoteForm::new();

        form.open_for_create();
        assert_eq!(form.state(), FormState::Creating);
        fill(&mut form, "Buy milk", "Errand", "Personal");

        let note = form.save(&store).await.unwrap();

        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(form.draft(), &NoteDraft::default());
        assert_eq!(store.notes().await, vec![note]);
    }

    #[tokio::test]
    async fn test_validation_failure_keeps_form_open() {
        let store = create_test_store().await;
        let mut form = NoteForm::new();

        form.open_for_create();
        form.set_text("No tags yet");

        let result = form.save(&store).await;

        assert!(matches!(result, Err(NoteStoreError::Validation(_))));
        assert_eq!(form.state(), FormState::Creating);
        assert_eq!(form.draft().text, "No tags yet");
        assert!(store.notes().await.is_empty());
    }

    #[tokio::test]
    async fn test_edit_flow_prefills_and_updates() {
        let store = create_test_store().await;
        let created = store
            .create(&NoteDraft::new("Agenda", "Meeting", "Acme"))
            .await
            .unwrap();
        let mut form = NoteForm::new();

        assert!(form.open_for_edit(&store, created.id).await);
        assert_eq!(form.state(), FormState::Editing(created.id));
        assert_eq!(form.draft(), &NoteDraft::from_note(&created));

        form.set_text("Agenda v2");
        let updated = form.save(&store).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.text, "Agenda v2");
        assert_eq!(store.notes().await, vec![updated]);
        assert_eq!(form.state(), FormState::Idle);
    }

    #[tokio::test]
    async fn test_open_for_edit_missing_note_is_noop() {
        let store = create_test_store().await;
        let mut form = NoteForm::new();
        form.open_for_create();
        form.set_text("draft in progress");

        assert!(!form.open_for_edit(&store, 99).await);
        assert_eq!(form.state(), FormState::Creating);
        assert_eq!(form.draft().text, "draft in progress");
    }

    #[tokio::test]
    async fn test_save_after_concurrent_delete_fails_not_found() {
        let store = create_test_store().await;
        let created = store
            .create(&NoteDraft::new("Agenda", "Meeting", "Acme"))
            .await
            .unwrap();
        let mut form = NoteForm::new();
        assert!(form.open_for_edit(&store, created.id).await);

        store.delete(created.id).await.unwrap();
        form.set_text("Agenda v2");
        let result = form.save(&store).await;

        assert!(matches!(result, Err(NoteStoreError::NotFound { id }) if id == created.id));
        assert!(store.list_all().await.unwrap().is_empty());
        assert_eq!(form.state(), FormState::Idle);
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let store = create_test_store().await;
        let mut form = NoteForm::new();

        form.open_for_create();
        fill(&mut form, "Never saved", "Errand", "Personal");
        form.cancel();

        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(form.draft(), &NoteDraft::default());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reopen_for_create_clears_previous_draft() {
        let mut form = NoteForm::new();
        form.open_for_create();
        form.set_text("stale");

        form.open_for_create();

        assert_eq!(form.draft(), &NoteDraft::default());
    }
}
