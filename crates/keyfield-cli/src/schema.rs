//! Interactive schema mutations: new item, new foreign key, delete field.
//!
//! Names are validated against the store before anything is requested from it.
//! Store failures are printed and end the operation without a retry.

use crate::console::{Console, LineSource};
use crate::error::DialogError;
use keyfield_core::{Error, FieldDef, KeyStore};
use std::io::Write;

/// Create an item field under `key`.
pub fn new_item<S, I, W>(store: &S, key: &str, console: &mut Console<I, W>) -> Result<(), DialogError>
where
    S: KeyStore + ?Sized,
    I: LineSource,
    W: Write,
{
    let existing = match store.all_fields() {
        Ok(fields) => names(fields),
        Err(e) => return report(console, &e),
    };
    let name = read_unique_name(console, "New Item Name: ", &existing)?;

    match store.new_item(&name, key) {
        Ok(_) => Ok(()),
        Err(e) => report(console, &e),
    }
}

/// Create a foreign key field under `key`, pointing at a key field chosen by the user.
pub fn new_foreign_key<S, I, W>(
    store: &S,
    key: &str,
    console: &mut Console<I, W>,
) -> Result<(), DialogError>
where
    S: KeyStore + ?Sized,
    I: LineSource,
    W: Write,
{
    let existing = match store.all_fields() {
        Ok(fields) => names(fields),
        Err(e) => return report(console, &e),
    };
    let name = read_unique_name(console, "New Foreign Key Name: ", &existing)?;

    let keys = match store.all_keys() {
        Ok(keys) => names(keys),
        Err(e) => return report(console, &e),
    };
    writeln!(console.out(), "\nDatabase Keys: ")?;
    print_names(console, &keys)?;
    writeln!(console.out())?;

    let target = read_existing_name(console, "Pointer Field: ", &keys)?;

    match store.new_foreign_key(&name, key, &target) {
        Ok(_) => Ok(()),
        Err(e) => report(console, &e),
    }
}

/// Delete one of the direct children of `key`.
pub fn delete_field<S, I, W>(
    store: &S,
    key: &str,
    console: &mut Console<I, W>,
) -> Result<(), DialogError>
where
    S: KeyStore + ?Sized,
    I: LineSource,
    W: Write,
{
    let children = match store.children_of(key) {
        Ok(children) => names(children),
        Err(e) => return report(console, &e),
    };
    if children.is_empty() {
        writeln!(console.out(), "No fields to delete!\n")?;
        return Ok(());
    }

    let name = read_existing_name(console, "Field to Delete: ", &children)?;

    match store.delete_field(&name) {
        Ok(_) => Ok(()),
        Err(e) => report(console, &e),
    }
}

/// Read a non-empty name that is not in `existing`, prompting again on collisions.
pub fn read_unique_name<I, W>(
    console: &mut Console<I, W>,
    prompt: &str,
    existing: &[String],
) -> Result<String, DialogError>
where
    I: LineSource,
    W: Write,
{
    loop {
        let name = console.read_not_empty(prompt)?;
        if !existing.contains(&name) {
            return Ok(name);
        }
        writeln!(console.out(), "*** Field '{}' already exists ***", name)?;
    }
}

/// Read a non-empty name that is in `candidates`, prompting again otherwise.
///
/// The error message names the token that was just rejected.
pub fn read_existing_name<I, W>(
    console: &mut Console<I, W>,
    prompt: &str,
    candidates: &[String],
) -> Result<String, DialogError>
where
    I: LineSource,
    W: Write,
{
    loop {
        let name = console.read_not_empty(prompt)?;
        if candidates.contains(&name) {
            return Ok(name);
        }
        writeln!(console.out(), "*** Field '{}' does not exist ***", name)?;
    }
}

/// Print a list of names, one per line, indented.
pub fn print_names<I, W>(console: &mut Console<I, W>, names: &[String]) -> Result<(), DialogError>
where
    I: LineSource,
    W: Write,
{
    if names.is_empty() {
        writeln!(console.out(), "  (none)")?;
    }
    for name in names {
        writeln!(console.out(), "  {}", name)?;
    }
    Ok(())
}

/// Print a store failure and end the current operation.
pub fn report<I, W>(console: &mut Console<I, W>, error: &Error) -> Result<(), DialogError>
where
    I: LineSource,
    W: Write,
{
    tracing::debug!(error = %error, "operation abandoned");
    writeln!(console.out(), "{}\n", error)?;
    Ok(())
}

fn names(fields: Vec<FieldDef>) -> Vec<String> {
    fields.into_iter().map(|f| f.name).collect()
}
