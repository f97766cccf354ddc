//! Runtime configuration
//!
//! `NotesConfig` says where notes are stored and which reference sets apply.
//! Every field has a default; environment variables override the defaults:
//!
//! - `CLIENTNOTES_DATA_PATH` - storage file (default `~/.clientnotes/storage.json`)
//! - `CLIENTNOTES_STORAGE_KEY` - key holding the note collection (default `NOTES`)
//! - `CLIENTNOTES_CLEAR_SCOPE` - `namespace` or `notes-only` (default `namespace`)
//! - `CLIENTNOTES_CATEGORIES_PATH` / `CLIENTNOTES_CLIENTS_PATH` - reference set overrides

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::FileStore;
use crate::models::{ReferenceData, ReferenceDataError};
use crate::services::{ClearScope, NoteStore, NoteStoreError, DEFAULT_NOTES_KEY};

pub const DATA_PATH_ENV: &str = "CLIENTNOTES_DATA_PATH";
pub const STORAGE_KEY_ENV: &str = "CLIENTNOTES_STORAGE_KEY";
pub const CLEAR_SCOPE_ENV: &str = "CLIENTNOTES_CLEAR_SCOPE";
pub const CATEGORIES_PATH_ENV: &str = "CLIENTNOTES_CATEGORIES_PATH";
pub const CLIENTS_PATH_ENV: &str = "CLIENTNOTES_CLIENTS_PATH";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to get home directory")]
    NoHomeDirectory,

    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },

    #[error(transparent)]
    ReferenceData(#[from] ReferenceDataError),

    #[error(transparent)]
    Store(#[from] NoteStoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Storage file; `None` resolves to the default location
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,

    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default)]
    pub clear_scope: ClearScope,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories_path: Option<PathBuf>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clients_path: Option<PathBuf>,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            storage_key: default_storage_key(),
            clear_scope: ClearScope::default(),
            categories_path: None,
            clients_path: None,
        }
    }
}

fn default_storage_key() -> String {
    DEFAULT_NOTES_KEY.to_string()
}

impl NotesConfig {
    /// Defaults overridden by any `CLIENTNOTES_*` variables that are set
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(DATA_PATH_ENV).filter(|v| !v.is_empty()) {
            tracing::info!("Using data path from {}: {}", DATA_PATH_ENV, path);
            config.data_path = Some(PathBuf::from(path));
        }
        if let Some(key) = lookup(STORAGE_KEY_ENV).filter(|v| !v.is_empty()) {
            config.storage_key = key;
        }
        if let Some(scope) = lookup(CLEAR_SCOPE_ENV).filter(|v| !v.is_empty()) {
            config.clear_scope = scope.parse().map_err(|reason| ConfigError::InvalidValue {
                var: CLEAR_SCOPE_ENV,
                reason,
            })?;
        }
        config.categories_path = lookup(CATEGORIES_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        config.clients_path = lookup(CLIENTS_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    /// The configured storage file, or `~/.clientnotes/storage.json`
    pub fn resolved_data_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.data_path {
            return Ok(path.clone());
        }
        let home_dir = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(home_dir.join(".clientnotes").join("storage.json"))
    }

    pub async fn load_reference_data(&self) -> Result<ReferenceData, ConfigError> {
        let reference = ReferenceData::load(
            self.categories_path.as_deref(),
            self.clients_path.as_deref(),
        )
        .await?;
        Ok(reference)
    }

    /// Build a file-backed `NoteStore` and load the collection
    pub async fn open_store(&self) -> Result<NoteStore, ConfigError> {
        let data_path = self.resolved_data_path()?;
        let reference = self.load_reference_data().await?;
        tracing::debug!("Opening note store at {}", data_path.display());

        let store = NoteStore::new(Arc::new(FileStore::new(data_path)), reference)
            .with_storage_key(self.storage_key.clone())
            .with_clear_scope(self.clear_scope);
        store.list_all().await?;
        Ok(store)
    }
}
