//! ClientNotes terminal front end
//!
//! # Usage
//!
//! ```bash
//! clientnotes add --text "Buy milk" --category Errand --client Personal
//! clientnotes list --client Personal
//! clientnotes edit 1 --text "Buy oat milk"
//! clientnotes delete 1
//! clientnotes clear
//! ```
//!
//! # Environment Variables
//!
//! - `CLIENTNOTES_*`: storage and reference-data settings, see `NotesConfig`
//! - `RUST_LOG`: Logging level (e.g., "info", "debug"), default "warn"

mod cli;
mod commands;
mod prompt;

use clap::Parser;
use clientnotes_core::services::{ClearConfirmer, Confirmation};
use clientnotes_core::NotesConfig;

use crate::cli::{Cli, Command};
use crate::prompt::LineConfirmer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = NotesConfig::from_env()?;
    if let Some(path) = cli.data_path {
        config = config.with_data_path(path);
    }
    let store = config.open_store().await?;

    let confirmer: Box<dyn ClearConfirmer> = match cli.command {
        Command::Clear { yes: true } => Box::new(Confirmation::Confirmed),
        _ => Box::new(LineConfirmer::stdin()),
    };

    let mut stdout = std::io::stdout().lock();
    commands::run(cli.command, &store, confirmer.as_ref(), &mut stdout).await
}
