use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clientnotes_core::models::NoteId;

/// Short client notes, tagged with a client and a category
#[derive(Parser, Debug)]
#[command(name = "clientnotes", version, about)]
pub struct Cli {
    /// Storage file (overrides CLIENTNOTES_DATA_PATH)
    #[arg(long, global = true)]
    pub data_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List stored notes
    List(ListArgs),

    /// Create a note
    Add(AddArgs),

    /// Change fields of an existing note
    Edit(EditArgs),

    /// Delete a note by id
    Delete { id: NoteId },

    /// Delete every note (asks first)
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Show the selectable categories
    Categories,

    /// Show the selectable clients
    Clients,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct ListArgs {
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub client: Option<String>,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct AddArgs {
    #[arg(long, short)]
    pub text: String,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub client: Option<String>,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct EditArgs {
    pub id: NoteId,

    #[arg(long, short)]
    pub text: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub client: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "clientnotes",
            "add",
            "--text",
            "Buy milk",
            "--category",
            "Errand",
            "--client",
            "Personal",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Add(AddArgs {
                text: "Buy milk".to_string(),
                category: Some("Errand".to_string()),
                client: Some("Personal".to_string()),
            })
        );
        assert_eq!(cli.data_path, None);
    }

    #[test]
    fn test_parse_global_data_path_and_clear() {
        let cli =
            Cli::try_parse_from(["clientnotes", "clear", "--yes", "--data-path", "/tmp/n.json"])
                .unwrap();

        assert_eq!(cli.command, Command::Clear { yes: true });
        assert_eq!(cli.data_path, Some(PathBuf::from("/tmp/n.json")));
    }

    #[test]
    fn test_parse_edit_requires_id() {
        assert!(Cli::try_parse_from(["clientnotes", "edit", "--text", "x"]).is_err());

        let cli =
            Cli::try_parse_from(["clientnotes", "edit", "4", "--client", "Acme Corp"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Edit(EditArgs {
                id: 4,
                text: None,
                category: None,
                client: Some("Acme Corp".to_string()),
            })
        );
    }
}
