//! keyfield command-line dialog
//!
//! An interactive CLI for evolving the schema of a keyfield database and
//! browsing its records.

mod commands;
mod config;
mod console;
mod database;
mod dialog;
mod error;
mod schema;
mod table;

#[cfg(test)]
mod testing;

use clap::Parser;
use config::Args;
use console::{Console, EditorInput, LineSource, ScriptedInput};
use database::DatabaseDialog;
use dialog::KeyDialog;
use error::DialogError;
use keyfield_core::StorageEngine;
use std::io::Write;

fn main() {
    // Logs go to stderr so they never mix with the dialog on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let storage = StorageEngine::open(args.storage_config())?;
    if let Some(key) = &args.key {
        storage.catalog().require_key(key)?;
    }

    let stdout = std::io::stdout();
    let result = match &args.script {
        Some(path) => {
            tracing::info!(script = %path.display(), "reading input from script");
            let console = Console::new(ScriptedInput::from_file(path)?, stdout.lock());
            run_dialog(&storage, args.key.as_deref(), console)
        }
        None => {
            let console = Console::new(EditorInput::new()?, stdout.lock());
            run_dialog(&storage, args.key.as_deref(), console)
        }
    };

    storage.flush()?;
    Ok(result?)
}

/// Run the key dialog if a key was named, the database dialog otherwise.
fn run_dialog<I: LineSource, W: Write>(
    storage: &StorageEngine,
    key: Option<&str>,
    mut console: Console<I, W>,
) -> Result<(), DialogError> {
    let result = match key {
        Some(key) => KeyDialog::new(storage, key).run(&mut console),
        None => DatabaseDialog::new(storage).run(&mut console),
    };

    match result {
        Err(e) if e.is_eof() => Ok(()),
        other => other,
    }
}
