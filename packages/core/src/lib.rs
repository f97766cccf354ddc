//! ClientNotes Core
//!
//! Local note-taking for client work: short text notes tagged with a client
//! and a category, kept in a single key-value persistence namespace.
//!
//! # Modules
//!
//! - [`models`] - Note, NoteDraft, reference sets
//! - [`db`] - Persistence backends behind the `KeyValueStore` trait
//! - [`services`] - NoteStore (collection owner) and NoteForm (edit state)
//! - [`config`] - Storage location and reference-data overrides
//!
//! # Example
//!
//! ```rust
//! use clientnotes_core::db::MemoryStore;
//! use clientnotes_core::models::{NoteDraft, ReferenceData};
//! use clientnotes_core::services::NoteStore;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let store = NoteStore::open(Arc::new(MemoryStore::new()), ReferenceData::bundled()?).await?;
//! let note = store.create(&NoteDraft::new("Buy milk", "Errand", "Personal")).await?;
//! assert_eq!(store.list_all().await?, vec![note]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # }).unwrap();
//! ```

pub mod config;
pub mod db;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::NotesConfig;
pub use models::*;
pub use services::*;
