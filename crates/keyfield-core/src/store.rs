//! The storage contract front ends are written against.

use crate::catalog::{FieldDef, FieldType};
use crate::error::Error;
use crate::storage::{Advance, Cursor, StorageEngine, Value};

/// Schema and record enumeration operations a front end needs from a store.
///
/// Fields are addressed by name, which is unique across the whole database.
pub trait KeyStore {
    /// Every field in the database, in creation order.
    fn all_fields(&self) -> Result<Vec<FieldDef>, Error>;

    /// Every key field in the database, in creation order.
    fn all_keys(&self) -> Result<Vec<FieldDef>, Error> {
        Ok(self
            .all_fields()?
            .into_iter()
            .filter(|f| f.field_type() == FieldType::Key)
            .collect())
    }

    /// Direct children of a key field, in their fixed order.
    fn children_of(&self, key: &str) -> Result<Vec<FieldDef>, Error>;

    /// Create a key field.
    fn new_key(&self, name: &str) -> Result<FieldDef, Error>;

    /// Create an item field under `parent`.
    fn new_item(&self, name: &str, parent: &str) -> Result<FieldDef, Error>;

    /// Create a foreign key field under `parent` pointing at `target`.
    fn new_foreign_key(&self, name: &str, parent: &str, target: &str)
        -> Result<FieldDef, Error>;

    /// Delete a field.
    fn delete_field(&self, name: &str) -> Result<FieldDef, Error>;

    /// Advance a cursor over the records of a key field.
    fn advance(&self, key: &str, cursor: Cursor) -> Result<Advance, Error>;

    /// The value a field holds in the record at `cursor`.
    fn value(&self, field: &str, cursor: Cursor) -> Result<Value, Error>;
}

impl KeyStore for StorageEngine {
    fn all_fields(&self) -> Result<Vec<FieldDef>, Error> {
        self.catalog().all_fields()
    }

    fn all_keys(&self) -> Result<Vec<FieldDef>, Error> {
        self.catalog().all_keys()
    }

    fn children_of(&self, key: &str) -> Result<Vec<FieldDef>, Error> {
        self.catalog().children_of(key)
    }

    fn new_key(&self, name: &str) -> Result<FieldDef, Error> {
        StorageEngine::new_key(self, name)
    }

    fn new_item(&self, name: &str, parent: &str) -> Result<FieldDef, Error> {
        StorageEngine::new_item(self, name, parent)
    }

    fn new_foreign_key(
        &self,
        name: &str,
        parent: &str,
        target: &str,
    ) -> Result<FieldDef, Error> {
        StorageEngine::new_foreign_key(self, name, parent, target)
    }

    fn delete_field(&self, name: &str) -> Result<FieldDef, Error> {
        StorageEngine::delete_field(self, name)
    }

    fn advance(&self, key: &str, cursor: Cursor) -> Result<Advance, Error> {
        StorageEngine::advance(self, key, cursor)
    }

    fn value(&self, field: &str, cursor: Cursor) -> Result<Value, Error> {
        StorageEngine::value(self, field, cursor)
    }
}
