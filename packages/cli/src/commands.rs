use std::io::Write;

use anyhow::{anyhow, Result};
use clientnotes_core::models::{Note, NoteFilter, ReferenceOption};
use clientnotes_core::services::{ClearConfirmer, ClearOutcome, NoteForm, NoteStore, NoteStoreError};

use crate::cli::{AddArgs, Command, EditArgs, ListArgs};

pub async fn run(
    command: Command,
    store: &NoteStore,
    confirmer: &dyn ClearConfirmer,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::List(args) => list(store, args, out).await,
        Command::Add(args) => add(store, args, out).await,
        Command::Edit(args) => edit(store, args, out).await,
        Command::Delete { id } => {
            if store.delete(id).await? {
                writeln!(out, "Deleted note {}", id)?;
            } else {
                writeln!(out, "No note with id {}", id)?;
            }
            Ok(())
        }
        Command::Clear { .. } => match store.clear_all(confirmer).await? {
            ClearOutcome::Cleared => Ok(writeln!(out, "All notes deleted")?),
            ClearOutcome::Cancelled => Ok(writeln!(out, "Cancelled")?),
        },
        Command::Categories => print_options(store.reference().categories(), out),
        Command::Clients => print_options(store.reference().clients(), out),
    }
}

async fn list(store: &NoteStore, args: ListArgs, out: &mut impl Write) -> Result<()> {
    let filter = NoteFilter {
        category: args.category,
        client: args.client,
    };
    let notes = store.filter(&filter).await;
    if notes.is_empty() {
        writeln!(out, "No notes")?;
    }
    for note in &notes {
        print_note(note, out)?;
    }
    Ok(())
}

async fn add(store: &NoteStore, args: AddArgs, out: &mut impl Write) -> Result<()> {
    let mut form = NoteForm::new();
    form.open_for_create();
    form.set_text(args.text);
    form.set_category(args.category);
    form.set_client(args.client);

    let note = form.save(store).await.map_err(user_facing)?;
    print_note(&note, out)
}

async fn edit(store: &NoteStore, args: EditArgs, out: &mut impl Write) -> Result<()> {
    let mut form = NoteForm::new();
    if !form.open_for_edit(store, args.id).await {
        return Err(anyhow!("No note with id {}", args.id));
    }
    if let Some(text) = args.text {
        form.set_text(text);
    }
    if args.category.is_some() {
        form.set_category(args.category);
    }
    if args.client.is_some() {
        form.set_client(args.client);
    }

    let note = form.save(store).await.map_err(user_facing)?;
    print_note(&note, out)
}

fn user_facing(err: NoteStoreError) -> anyhow::Error {
    if err.is_validation() {
        anyhow!("Please enter required fields ({})", err)
    } else {
        err.into()
    }
}

fn print_note(note: &Note, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "[{}] {} / {}: {}",
        note.id, note.client, note.category, note.text
    )?;
    Ok(())
}

fn print_options(options: &[ReferenceOption], out: &mut impl Write) -> Result<()> {
    for option in options {
        if option.label == option.value {
            writeln!(out, "{}", option.value)?;
        } else {
            writeln!(out, "{} ({})", option.label, option.value)?;
        }
    }
    Ok(())
}
