//! Category and client reference sets
//!
//! Both sets are fixed for the lifetime of the process. The bundled defaults
//! live in `data/categories.json` and `data/clients.json`; either can be
//! replaced by a file of the same shape at startup.
//!
//! Entries may be written as dropdown items (`{"label": "...", "value": "..."}`)
//! or as bare strings, in which case label and value are the same.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;

const BUNDLED_CATEGORIES: &str = include_str!("../../data/categories.json");
const BUNDLED_CLIENTS: &str = include_str!("../../data/clients.json");

#[derive(Error, Debug)]
pub enum ReferenceDataError {
    #[error("Failed to read reference data from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse reference data ({origin}): {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },
}

/// One selectable category or client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOption")]
pub struct ReferenceOption {
    pub label: String,
    pub value: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOption {
    Plain(String),
    Item { label: String, value: Option<String> },
}

impl From<RawOption> for ReferenceOption {
    fn from(raw: RawOption) -> Self {
        match raw {
            RawOption::Plain(value) => Self {
                label: value.clone(),
                value,
            },
            RawOption::Item { label, value } => Self {
                value: value.unwrap_or_else(|| label.clone()),
                label,
            },
        }
    }
}

#[derive(Deserialize)]
struct CategoriesFile {
    categories: Vec<ReferenceOption>,
}

#[derive(Deserialize)]
struct ClientsFile {
    clients: Vec<ReferenceOption>,
}

/// The valid-value sets for `Note::category` and `Note::client`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceData {
    categories: Vec<ReferenceOption>,
    clients: Vec<ReferenceOption>,
    restricted: bool,
}

impl ReferenceData {
    pub fn new(categories: Vec<ReferenceOption>, clients: Vec<ReferenceOption>) -> Self {
        Self {
            categories,
            clients,
            restricted: true,
        }
    }

    /// Build sets where each label equals its value
    pub fn from_values<C, K>(categories: C, clients: K) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        let to_options = |values: Vec<String>| -> Vec<ReferenceOption> {
            values
                .into_iter()
                .map(|value| ReferenceOption {
                    label: value.clone(),
                    value,
                })
                .collect()
        };
        Self::new(
            to_options(categories.into_iter().map(Into::into).collect()),
            to_options(clients.into_iter().map(Into::into).collect()),
        )
    }

    /// Accept any non-empty category and client
    pub fn permissive() -> Self {
        Self {
            categories: Vec::new(),
            clients: Vec::new(),
            restricted: false,
        }
    }

    /// The sets compiled into the crate
    pub fn bundled() -> Result<Self, ReferenceDataError> {
        Ok(Self::new(
            parse_categories(BUNDLED_CATEGORIES, "bundled categories")?,
            parse_clients(BUNDLED_CLIENTS, "bundled clients")?,
        ))
    }

    /// Load both sets, falling back to the bundled file for any path not given
    pub async fn load(
        categories_path: Option<&Path>,
        clients_path: Option<&Path>,
    ) -> Result<Self, ReferenceDataError> {
        let categories = match categories_path {
            Some(path) => parse_categories(&read(path).await?, &path.display().to_string())?,
            None => parse_categories(BUNDLED_CATEGORIES, "bundled categories")?,
        };
        let clients = match clients_path {
            Some(path) => parse_clients(&read(path).await?, &path.display().to_string())?,
            None => parse_clients(BUNDLED_CLIENTS, "bundled clients")?,
        };

        tracing::debug!(
            "Loaded reference data: {} categories, {} clients",
            categories.len(),
            clients.len()
        );
        Ok(Self::new(categories, clients))
    }

    pub fn categories(&self) -> &[ReferenceOption] {
        &self.categories
    }

    pub fn clients(&self) -> &[ReferenceOption] {
        &self.clients
    }

    pub fn has_category(&self, value: &str) -> bool {
        !self.restricted || self.categories.iter().any(|c| c.value == value)
    }

    pub fn has_client(&self, value: &str) -> bool {
        !self.restricted || self.clients.iter().any(|c| c.value == value)
    }
}

async fn read(path: &Path) -> Result<String, ReferenceDataError> {
    fs::read_to_string(path)
        .await
        .map_err(|source| ReferenceDataError::Read {
            path: path.to_path_buf(),
            source,
        })
}

fn parse_categories(json: &str, origin: &str) -> Result<Vec<ReferenceOption>, ReferenceDataError> {
    serde_json::from_str::<CategoriesFile>(json)
        .map(|file| file.categories)
        .map_err(|source| ReferenceDataError::Parse {
            origin: origin.to_string(),
            source,
        })
}

fn parse_clients(json: &str, origin: &str) -> Result<Vec<ReferenceOption>, ReferenceDataError> {
    serde_json::from_str::<ClientsFile>(json)
        .map(|file| file.clients)
        .map_err(|source| ReferenceDataError::Parse {
            origin: origin.to_string(),
            source,
        })
}
