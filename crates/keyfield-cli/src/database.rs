//! Database-level menu: create, open, and delete key fields.

use crate::commands::{DatabaseCommand, COMMAND_PROMPT, DATABASE_MENU};
use crate::console::{Console, LineSource};
use crate::dialog::KeyDialog;
use crate::error::DialogError;
use crate::schema::{print_names, read_existing_name, read_unique_name, report};
use keyfield_core::KeyStore;
use std::io::Write;

/// Top-level dialog listing the key fields of a database.
pub struct DatabaseDialog<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyStore + ?Sized> DatabaseDialog<'a, S> {
    /// Create a dialog over `store`.
    pub fn new(store: &'a S) -> Self {
        Self { store }
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

    fn run_menu<I: LineSource, W: Write>(
        &self,
        console: &mut Console<I, W>,
    ) -> Result<bool, DialogError> {
        let keys = self.draw(console)?;

        loop {
            let line = match console.read_line(COMMAND_PROMPT) {
                Ok(line) => line,
                Err(DialogError::Interrupted) => {
                    writeln!(console.out(), "^C")?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let outcome = match DatabaseCommand::parse(&line) {
                DatabaseCommand::Quit => return Ok(false),
                DatabaseCommand::NewKey => self.new_key(console),
                DatabaseCommand::OpenKey => self.open_key(console, &keys),
                DatabaseCommand::DeleteKey => self.delete_key(console, &keys),
                DatabaseCommand::Unknown(token) => {
                    writeln!(console.out(), "Unknown command '{}'", token)?;
                    continue;
                }
            };

            match outcome {
                Err(DialogError::Interrupted) => writeln!(console.out(), "^C")?,
                other => other?,
            }
            return Ok(true);
        }
    }

    /// Print the header, key list, and menu. Returns the listed key names.
    fn draw<I: LineSource, W: Write>(
        &self,
        console: &mut Console<I, W>,
    ) -> Result<Vec<String>, DialogError> {
        writeln!(console.out(), "\n=== Database ===")?;
        writeln!(console.out(), "Keys: ")?;

        let keys = match self.store.all_keys() {
            Ok(keys) => keys.into_iter().map(|k| k.name).collect(),
            Err(e) => {
                writeln!(console.out(), "{}", e)?;
                Vec::new()
            }
        };
        print_names(console, &keys)?;

        writeln!(console.out(), "\n{}", DATABASE_MENU)?;
        Ok(keys)
    }

    fn new_key<I: LineSource, W: Write>(&self, console: &mut Console<I, W>) -> Result<(), DialogError> {
        let existing: Vec<String> = match self.store.all_fields() {
            Ok(fields) => fields.into_iter().map(|f| f.name).collect(),
            Err(e) => return report(console, &e),
        };
        let name = read_unique_name(console, "New Key Name: ", &existing)?;

        match self.store.new_key(&name) {
            Ok(_) => Ok(()),
            Err(e) => report(console, &e),
        }
    }

    fn open_key<I: LineSource, W: Write>(
        &self,
        console: &mut Console<I, W>,
        keys: &[String],
    ) -> Result<(), DialogError> {
        if keys.is_empty() {
            writeln!(console.out(), "No keys to open!\n")?;
            return Ok(());
        }

        let name = read_existing_name(console, "Key to Open: ", keys)?;
        KeyDialog::new(self.store, name).run(console)
    }

    fn delete_key<I: LineSource, W: Write>(
        &self,
        console: &mut Console<I, W>,
        keys: &[String],
    ) -> Result<(), DialogError> {
        if keys.is_empty() {
            writeln!(console.out(), "No keys to delete!\n")?;
            return Ok(());
        }

        let name = read_existing_name(console, "Key to Delete: ", keys)?;
        match self.store.delete_field(&name) {
            Ok(_) => Ok(()),
            Err(e) => report(console, &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{output, scripted, shop_engine};
    use keyfield_core::{StorageConfig, StorageEngine};

    fn run_script(store: &dyn KeyStore, lines: &[&str]) -> String {
        let mut console = scripted(lines);
        DatabaseDialog::new(store).run(&mut console).unwrap();
        output(&mut console)
    }

    #[test]
    fn test_lists_keys() {
        let engine = shop_engine();

        let out = run_script(&engine, &["Q"]);

        assert!(out.starts_with("\n=== Database ===\nKeys: \n  CUSTOMER\n  ORDER\n"));
        assert!(out.contains(DATABASE_MENU));
    }

    #[test]
    fn test_new_key_on_empty_database() {
        let engine = StorageEngine::open(StorageConfig::temporary()).unwrap();

        let out = run_script(&engine, &["ok", "nk", "", "PART", "Q"]);

        assert!(out.contains("Keys: \n  (none)\n"));
        assert!(out.contains("No keys to open!\n"));
        assert!(out.contains("Keys: \n  PART\n"));
    }

    #[test]
    fn test_new_key_name_must_be_unique() {
        let engine = shop_engine();

        let out = run_script(&engine, &["NK", "NAME", "REGION", "Q"]);

        assert!(out.contains("*** Field 'NAME' already exists ***"));
        assert_eq!(engine.catalog().all_keys().unwrap().len(), 3);
    }

    #[test]
    fn test_open_key_runs_key_dialog() {
        let engine = shop_engine();

        let out = run_script(&engine, &["OK", "NAME", "ORDER", "NI", "STATUS", "Q", "Q"]);

        assert!(out.contains("*** Field 'NAME' does not exist ***"));
        assert_eq!(out.matches("=== ORDER ===").count(), 2);
        assert_eq!(out.matches("=== Database ===").count(), 2);
        assert_eq!(
            engine.catalog().get("STATUS").unwrap().unwrap().parent(),
            Some("ORDER")
        );
    }

    #[test]
    fn test_delete_key_reports_children() {
        let engine = shop_engine();
        engine.new_key("REGION").unwrap();

        let out = run_script(&engine, &["DK", "CUSTOMER", "DK", "REGION", "Q"]);

        assert!(out.contains("key 'CUSTOMER' still has child fields\n"));
        assert!(engine.catalog().contains("CUSTOMER").unwrap());
        assert!(!engine.catalog().contains("REGION").unwrap());
    }

    #[test]
    fn test_empty_line_is_unknown() {
        let engine = shop_engine();

        let out = run_script(&engine, &["", "Q"]);

        assert!(out.contains("Unknown command ''\n"));
        assert_eq!(out.matches("=== Database ===").count(), 1);
    }

    #[test]
    fn test_eof_inside_key_dialog_propagates() {
        let engine = shop_engine();
        let mut console = scripted(&["OK", "CUSTOMER"]);

        let err = DatabaseDialog::new(&engine).run(&mut console).unwrap_err();
        assert!(err.is_eof());
    }
}
