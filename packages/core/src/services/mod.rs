//! Business Services
//!
//! - `NoteStore` - Owns the note collection and every read/write of it
//! - `NoteForm` - Idle / Creating / Editing state for the note form
//! - Clear-all confirmation and scope types
//!
//! Callers never talk to the persistence backend directly; everything goes
//! through `NoteStore`.

mod clear;
pub mod error;
mod note_form;
mod note_store;

pub use clear::{ClearConfirmer, ClearOutcome, ClearScope, Confirmation, ConfirmPrompt};
pub use error::NoteStoreError;
pub use note_form::{FormState, NoteForm};
pub use note_store::{NoteStore, DEFAULT_NOTES_KEY};
