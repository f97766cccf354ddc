//! Note and NoteDraft
//!
//! `Note` is the persisted record. Its serialized form is the element shape of
//! the stored collection: `{ "id": 1, "text": "...", "category": "...", "client": "..." }`.
//!
//! `NoteDraft` is the unsaved form state for a note being created or edited.
//! It is never persisted; `NoteStore` validates it and turns it into a `Note`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ReferenceData;

/// Integer note identifier, unique within the stored collection
pub type NoteId = i64;

/// Validation errors raised before any note reaches storage
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Note text cannot be empty")]
    EmptyText,

    #[error("Missing required field: category")]
    MissingCategory,

    #[error("Missing required field: client")]
    MissingClient,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown client: {0}")]
    UnknownClient(String),
}

/// A persisted note tagged with a client and a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub text: String,
    pub category: String,
    pub client: String,
}

impl Note {
    /// Replace every editable field with the draft's values, keeping `id`.
    ///
    /// The draft must already be validated; use [`NoteDraft::validate`].
    pub(crate) fn apply(&mut self, fields: ValidatedDraft) {
        self.text = fields.text;
        self.category = fields.category;
        self.client = fields.client;
    }

    pub(crate) fn from_validated(id: NoteId, fields: ValidatedDraft) -> Self {
        Self {
            id,
            text: fields.text,
            category: fields.category,
            client: fields.client,
        }
    }
}

/// Transient text/category/client captured while the note form is open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub text: String,
    pub category: Option<String>,
    pub client: Option<String>,
}

impl NoteDraft {
    pub fn new(
        text: impl Into<String>,
        category: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            category: Some(category.into()),
            client: Some(client.into()),
        }
    }

    /// Pre-populate a draft from an existing note (edit workflow)
    pub fn from_note(note: &Note) -> Self {
        Self {
            text: note.text.clone(),
            category: Some(note.category.clone()),
            client: Some(note.client.clone()),
        }
    }

    /// Check required fields and reference-set membership.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule, checked in order: text, category, client.
    pub fn validate(&self, reference: &ReferenceData) -> Result<ValidatedDraft, ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }

        let category = self
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or(ValidationError::MissingCategory)?;
        if !reference.has_category(category) {
            return Err(ValidationError::UnknownCategory(category.to_string()));
        }

        let client = self
            .client
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or(ValidationError::MissingClient)?;
        if !reference.has_client(client) {
            return Err(ValidationError::UnknownClient(client.to_string()));
        }

        Ok(ValidatedDraft {
            text: self.text.clone(),
            category: category.to_string(),
            client: client.to_string(),
        })
    }
}

/// Draft fields that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDraft {
    text: String,
    category: String,
    client: String,
}

/// Listing filter over client and category.
///
/// Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub category: Option<String>,
    pub client: Option<String>,
}

impl NoteFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn matches(&self, note: &Note) -> bool {
        self.category.as_ref().map_or(true, |c| *c == note.category)
            && self.client.as_ref().map_or(true, |c| *c == note.client)
    }
}
