//! Per-key menu dialog.

use crate::commands::{KeyCommand, COMMAND_PROMPT, KEY_MENU};
use crate::console::{Console, LineSource};
use crate::error::DialogError;
use crate::{schema, table};
use keyfield_core::{FieldDef, FieldKind, KeyStore};
use std::io::Write;

/// Dialog for inspecting and evolving one key field.
pub struct KeyDialog<'a, S: ?Sized> {
    store: &'a S,
    key: String,
}

impl<'a, S: KeyStore + ?Sized> KeyDialog<'a, S> {
    /// Create a dialog for the key field named `key`.
    pub fn new(store: &'a S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Run the dialog until the user quits.
    ///
    /// Returns [`DialogError::Eof`] if input runs out first.
    pub fn run<I: LineSource, W: Write>(
        &self,
        console: &mut Console<I, W>,
    ) -> Result<(), DialogError> {
        while self.run_menu(console)? {}
        Ok(())
    }

    /// Draw the menu and handle one command. Returns false once the user quits.
    fn run_menu<I: LineSource, W: Write>(
        &self,
        console: &mut Console<I, W>,
    ) -> Result<bool, DialogError> {
        self.draw(console)?;

        loop {
            let line = match console.read_line(COMMAND_PROMPT) {
                Ok(line) => line,
                Err(DialogError::Interrupted) => {
                    writeln!(console.out(), "^C")?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let outcome = match KeyCommand::parse(&line) {
                KeyCommand::Quit => return Ok(false),
                KeyCommand::NewItem => schema::new_item(self.store, &self.key, console),
                KeyCommand::NewForeignKey => {
                    schema::new_foreign_key(self.store, &self.key, console)
                }
                KeyCommand::DeleteField => schema::delete_field(self.store, &self.key, console),
                KeyCommand::View => table::view_records(self.store, &self.key, console),
                KeyCommand::Unknown(token) => {
                    writeln!(console.out(), "Unknown command '{}'", token)?;
                    continue;
                }
            };

            // Ctrl-C at a sub-prompt abandons that operation only.
            match outcome {
                Err(DialogError::Interrupted) => writeln!(console.out(), "^C")?,
                other => other?,
            }
            return Ok(true);
        }
    }

    /// Print the header, the key's current children, and the menu.
    fn draw<I: LineSource, W: Write>(&self, console: &mut Console<I, W>) -> Result<(), DialogError> {
        writeln!(console.out(), "\n=== {} ===", self.key)?;
        writeln!(console.out(), "Children: ")?;

        match self.store.children_of(&self.key) {
            Ok(children) if children.is_empty() => writeln!(console.out(), "  (none)")?,
            Ok(children) => {
                for child in &children {
                    writeln!(console.out(), "  {}", describe(child))?;
                }
            }
            Err(e) => writeln!(console.out(), "{}", e)?,
        }

        writeln!(console.out(), "\n{}", KEY_MENU)?;
        Ok(())
    }
}

fn describe(field: &FieldDef) -> String {
    match &field.kind {
        FieldKind::ForeignKey { target, .. } => {
            format!("{} ({} -> {})", field.name, field.field_type(), target)
        }
        _ => format!("{} ({})", field.name, field.field_type()),
    }
}
