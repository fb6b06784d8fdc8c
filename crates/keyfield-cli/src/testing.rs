//! Shared fixtures for dialog tests.

use crate::console::{Console, ScriptedInput};
use keyfield_core::{
    Advance, Cursor, Error, FieldDef, KeyStore, Record, StorageConfig, StorageEngine, Value,
};
use std::cell::Cell;

/// A console fed by `lines` that captures output in memory.
pub fn scripted(lines: &[&str]) -> Console<ScriptedInput, Vec<u8>> {
    Console::new(ScriptedInput::from_lines(lines.iter().copied()), Vec::new())
}

/// Everything written to a scripted console so far.
pub fn output(console: &mut Console<ScriptedInput, Vec<u8>>) -> String {
    String::from_utf8_lossy(console.out()).into_owned()
}

/// CUSTOMER(NAME, EMAIL) and ORDER(TOTAL), no records.
pub fn shop_engine() -> StorageEngine {
    let engine = StorageEngine::open(StorageConfig::temporary()).unwrap();
    engine.new_key("CUSTOMER").unwrap();
    engine.new_item("NAME", "CUSTOMER").unwrap();
    engine.new_item("EMAIL", "CUSTOMER").unwrap();
    engine.new_key("ORDER").unwrap();
    engine.new_item("TOTAL", "ORDER").unwrap();
    engine
}

/// CUSTOMER(NAME, EMAIL) with two records.
pub fn customer_engine() -> StorageEngine {
    let engine = StorageEngine::open(StorageConfig::temporary()).unwrap();
    engine.new_key("CUSTOMER").unwrap();
    engine.new_item("NAME", "CUSTOMER").unwrap();
    engine.new_item("EMAIL", "CUSTOMER").unwrap();
    engine
        .insert_record(
            "CUSTOMER",
            Record::new("1")
                .with_value("NAME", "Alice")
                .with_value("EMAIL", "a@x.com"),
        )
        .unwrap();
    engine
        .insert_record(
            "CUSTOMER",
            Record::new("2")
                .with_value("NAME", "Bob")
                .with_value("EMAIL", "b@y.com"),
        )
        .unwrap();
    engine
}

/// A store that forwards to a real engine but fails on demand.
pub struct FaultyStore<'a> {
    inner: &'a StorageEngine,
    fail_mutations: bool,
    fail_advance_at: Option<usize>,
    advances: Cell<usize>,
}

impl<'a> FaultyStore<'a> {
    pub fn new(inner: &'a StorageEngine) -> Self {
        Self {
            inner,
            fail_mutations: false,
            fail_advance_at: None,
            advances: Cell::new(0),
        }
    }

    /// Make every field creation and deletion fail.
    pub fn failing_mutations(mut self) -> Self {
        self.fail_mutations = true;
        self
    }

    /// Make the advance call with this zero-based index fail.
    pub fn failing_advance_at(mut self, call: usize) -> Self {
        self.fail_advance_at = Some(call);
        self
    }

    fn mutation(&self) -> Result<(), Error> {
        if self.fail_mutations {
            return Err(simulated());
        }
        Ok(())
    }
}

fn simulated() -> Error {
    Error::Deserialization("simulated failure".to_string())
}

impl KeyStore for FaultyStore<'_> {
    fn all_fields(&self) -> Result<Vec<FieldDef>, Error> {
        self.inner.all_fields()
    }

    fn children_of(&self, key: &str) -> Result<Vec<FieldDef>, Error> {
        self.inner.children_of(key)
    }

    fn new_key(&self, name: &str) -> Result<FieldDef, Error> {
        self.mutation()?;
        self.inner.new_key(name)
    }

    fn new_item(&self, name: &str, parent: &str) -> Result<FieldDef, Error> {
        self.mutation()?;
        self.inner.new_item(name, parent)
    }

    fn new_foreign_key(&self, name: &str, parent: &str, target: &str) -> Result<FieldDef, Error> {
        self.mutation()?;
        self.inner.new_foreign_key(name, parent, target)
    }

    fn delete_field(&self, name: &str) -> Result<FieldDef, Error> {
        self.mutation()?;
        self.inner.delete_field(name)
    }

    fn advance(&self, key: &str, cursor: Cursor) -> Result<Advance, Error> {
        let call = self.advances.get();
        self.advances.set(call + 1);
        if self.fail_advance_at == Some(call) {
            return Err(simulated());
        }
        self.inner.advance(key, cursor)
    }

    fn value(&self, field: &str, cursor: Cursor) -> Result<Value, Error> {
        self.inner.value(field, cursor)
    }
}
