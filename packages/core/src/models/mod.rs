//! Data Models
//!
//! - `Note` - The persisted record (id, text, category, client)
//! - `NoteDraft` - Unsaved form input, validated before it reaches storage
//! - `ReferenceData` - The fixed category and client sets

mod note;
mod reference;

pub use note::{Note, NoteDraft, NoteFilter, NoteId, ValidatedDraft, ValidationError};
pub use reference::{ReferenceData, ReferenceDataError, ReferenceOption};
