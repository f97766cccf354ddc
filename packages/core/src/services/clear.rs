//! Clear-all confirmation and scope
//!
//! Clearing is irreversible, so `NoteStore::clear_all` only runs after a
//! [`ClearConfirmer`] answers yes to the two-choice [`ConfirmPrompt`].
//!
//! With the default [`ClearScope::Namespace`] the whole persistence namespace is
//! erased, including keys that do not belong to the note collection. Use
//! [`ClearScope::NotesOnly`] to remove just the notes key.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What `clear_all` erases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClearScope {
    /// Every key in the backend namespace
    #[default]
    Namespace,
    /// Only the note collection key
    NotesOnly,
}

impl FromStr for ClearScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "namespace" | "all" => Ok(Self::Namespace),
            "notes-only" | "notes" => Ok(Self::NotesOnly),
            other => Err(format!("Unknown clear scope: {}", other)),
        }
    }
}

impl fmt::Display for ClearScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Namespace => write!(f, "namespace"),
            Self::NotesOnly => write!(f, "notes-only"),
        }
    }
}

/// The question shown before clearing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub cancel_label: &'static str,
    pub confirm_label: &'static str,
}

impl ConfirmPrompt {
    pub const CLEAR_ALL: ConfirmPrompt = ConfirmPrompt {
        title: "Delete",
        message: "Are you sure you want to delete all notes",
        cancel_label: "No",
        confirm_label: "Yes",
    };
}

/// Asks the user to confirm or cancel a destructive operation
#[async_trait]
pub trait ClearConfirmer: Send + Sync {
    /// `true` means the user picked the confirm choice
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

/// An answer given ahead of time, e.g. from a `--yes` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

#[async_trait]
impl ClearConfirmer for Confirmation {
    async fn confirm(&self, _prompt: &ConfirmPrompt) -> bool {
        *self == Confirmation::Confirmed
    }
}

/// Result of a `clear_all` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared,
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_scope_parse() {
        assert_eq!("namespace".parse::<ClearScope>(), Ok(ClearScope::Namespace));
        assert_eq!("Notes-Only".parse::<ClearScope>(), Ok(ClearScope::NotesOnly));
        assert!("everything".parse::<ClearScope>().is_err());
    }

    #[test]
    fn test_clear_scope_serde() {
        let scope: ClearScope = serde_json::from_str("\"notes-only\"").unwrap();
        assert_eq!(scope, ClearScope::NotesOnly);
        assert_eq!(serde_json::to_string(&ClearScope::Namespace).unwrap(), "\"namespace\"");
    }

    #[tokio::test]
    async fn test_preset_confirmation() {
        assert!(Confirmation::Confirmed.confirm(&ConfirmPrompt::CLEAR_ALL).await);
        assert!(!Confirmation::Cancelled.confirm(&ConfirmPrompt::CLEAR_ALL).await);
    }
}
