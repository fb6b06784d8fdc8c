//! Record table rendering.

use crate::console::{Console, LineSource};
use crate::error::DialogError;
use crate::schema::report;
use keyfield_core::{Advance, Cursor, Error, FieldDef, KeyStore};
use std::io::Write;

/// Text cells for every record under a key, header row first.
///
/// Column 0 holds the key field; column `i + 1` holds the key's `i`th child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTable {
    rows: Vec<Vec<String>>,
}

impl RecordTable {
    /// Create a table with just a header row.
    pub fn new(header: Vec<String>) -> Self {
        Self { rows: vec![header] }
    }

    /// Append a data row. It must have one cell per header column.
    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.rows[0].len());
        self.rows.push(row);
    }

    /// The header row.
    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    /// The data rows, in enumeration order.
    #[cfg(test)]
    pub fn data_rows(&self) -> &[Vec<String>] {
        &self.rows[1..]
    }

    /// Width of each column: the longest cell in it, header included, in chars.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![0; self.header().len()];
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    /// Format every row as `|cell|cell|...|`, each cell left-justified to its column width.
    pub fn render(&self) -> Vec<String> {
        let widths = self.column_widths();
        self.rows
            .iter()
            .map(|row| {
                let mut line = String::from("|");
                for (cell, width) in row.iter().zip(&widths) {
                    line.push_str(&format!("{:<width$}|", cell, width = width));
                }
                line
            })
            .collect()
    }
}

/// A table built from a record enumeration, plus the failure that cut it short, if any.
#[derive(Debug)]
pub struct Enumeration {
    /// Rows collected before enumeration stopped.
    pub table: RecordTable,
    /// The store failure that stopped enumeration early.
    pub error: Option<Error>,
}

/// Enumerate every record under `key` into a table.
///
/// End of list finishes the table. Any other failure while enumerating also
/// stops it; the rows gathered so far are kept and the failure is returned
/// alongside them.
pub fn collect_table<S>(store: &S, key: &str) -> Result<Enumeration, Error>
where
    S: KeyStore + ?Sized,
{
    let children = store.children_of(key)?;

    let mut header = Vec::with_capacity(children.len() + 1);
    header.push(key.to_string());
    header.extend(children.iter().map(|c| c.name.clone()));
    let mut table = RecordTable::new(header);

    let mut cursor = Cursor::Start;
    let error = loop {
        cursor = match store.advance(key, cursor) {
            Ok(Advance::Next(next)) => next,
            Ok(Advance::EndOfList) => break None,
            Err(e) => break Some(e),
        };

        match row_at(store, key, &children, cursor) {
            Ok(row) => table.push_row(row),
            Err(e) => break Some(e),
        }
    };

    Ok(Enumeration { table, error })
}

fn row_at<S>(store: &S, key: &str, children: &[FieldDef], cursor: Cursor) -> Result<Vec<String>, Error>
where
    S: KeyStore + ?Sized,
{
    let mut row = Vec::with_capacity(children.len() + 1);
    row.push(store.value(key, cursor)?.to_string());
    for child in children {
        row.push(store.value(&child.name, cursor)?.to_string());
    }
    Ok(row)
}

/// Print every record under `key` as an aligned table.
pub fn view_records<S, I, W>(
    store: &S,
    key: &str,
    console: &mut Console<I, W>,
) -> Result<(), DialogError>
where
    S: KeyStore + ?Sized,
    I: LineSource,
    W: Write,
{
    let enumeration = match collect_table(store, key) {
        Ok(enumeration) => enumeration,
        Err(e) => return report(console, &e),
    };

    if let Some(e) = &enumeration.error {
        report(console, e)?;
    }
    for line in enumeration.table.render() {
        writeln!(console.out(), "{}", line)?;
    }
    Ok(())
}
