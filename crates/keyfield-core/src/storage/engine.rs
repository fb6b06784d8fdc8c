//! Storage engine implementation.

use super::{Advance, Cursor, Record, StorageConfig, Value};
use crate::catalog::{Catalog, FieldDef, FieldKind};
use crate::error::{Error, SchemaError};
use sled::{Db, Tree};
use std::ops::Bound;
use tracing::{debug, info};

/// Prefix for per-key record trees.
const RECORDS_PREFIX: &str = "records:";

/// The main storage engine wrapping sled.
///
/// Holds the field catalog and one record tree per key field. Record trees map a
/// big-endian row id to an rkyv-encoded [`Record`].
pub struct StorageEngine {
    /// The underlying sled database.
    db: Db,

    /// Field definitions.
    catalog: Catalog,
}

impl StorageEngine {
    /// Open or create a storage engine with the given configuration.
    pub fn open(config: StorageConfig) -> Result<Self, Error> {
        let sled_config = config.to_sled_config();
        let db = sled_config.open()?;
        let catalog = Catalog::open(&db)?;
        let engine = Self { db, catalog };

        info!(
            path = %config.path.display(),
            temporary = config.temporary,
            recovered = engine.was_recovered(),
            "opened storage engine"
        );

        Ok(engine)
    }

    /// Check if the database was recovered from a previous run.
    pub fn was_recovered(&self) -> bool {
        self.db.was_recovered()
    }

    /// The field catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ========== Schema ==========

    /// Create a new key field.
    pub fn new_key(&self, name: &str) -> Result<FieldDef, Error> {
        let def = FieldDef::key(name).at_position(self.next_position()?);
        self.catalog.insert(&def)?;
        debug!(field = %name, "created key field");
        Ok(def)
    }

    /// Create a new item field under an existing key field.
    pub fn new_item(&self, name: &str, parent: &str) -> Result<FieldDef, Error> {
        self.catalog.require_key(parent)?;
        let def = FieldDef::item(name, parent).at_position(self.next_position()?);
        self.catalog.insert(&def)?;
        debug!(field = %name, parent = %parent, "created item field");
        Ok(def)
    }

    /// Create a new foreign key field under `parent` pointing at `target`.
    pub fn new_foreign_key(
        &self,
        name: &str,
        parent: &str,
        target: &str,
    ) -> Result<FieldDef, Error> {
        self.catalog.require_key(parent)?;
        self.catalog.require_key(target)?;
        let def = FieldDef::foreign_key(name, parent, target).at_position(self.next_position()?);
        self.catalog.insert(&def)?;
        debug!(field = %name, parent = %parent, target = %target, "created foreign key field");
        Ok(def)
    }

    /// Delete a field.
    ///
    /// Child fields have their values stripped from every record of their key.
    /// Key fields must have no children and no foreign keys pointing at them;
    /// their records are dropped along with them.
    pub fn delete_field(&self, name: &str) -> Result<FieldDef, Error> {
        let def = self.catalog.require(name)?;

        match &def.kind {
            FieldKind::Key => {
                if !self.catalog.children_of(name)?.is_empty() {
                    return Err(SchemaError::HasChildren(name.to_string()).into());
                }
                if let Some(referrer) = self.catalog.references_to(name)?.into_iter().next() {
                    return Err(SchemaError::Referenced {
                        key: name.to_string(),
                        by: referrer.name,
                    }
                    .into());
                }
                self.catalog.remove(name)?;
                self.db.drop_tree(Self::records_tree_name(name))?;
                debug!(field = %name, "deleted key field");
            }
            FieldKind::Item { parent } | FieldKind::ForeignKey { parent, .. } => {
                // Strip values before dropping the definition so a later field
                // with the same name never sees stale data.
                let tree = self.records_tree(parent)?;
                let mut stripped = 0usize;
                for result in tree.iter() {
                    let (key, value) = result?;
                    let mut record = Record::from_bytes(&value)?;
                    if record.remove(name) {
                        tree.insert(key, record.to_bytes()?)?;
                        stripped += 1;
                    }
                }
                self.catalog.remove(name)?;
                debug!(field = %name, parent = %parent, stripped, "deleted child field");
            }
        }

        Ok(def)
    }

    // ========== Records ==========

    /// Insert a record under a key field.
    ///
    /// Every value must belong to a direct child of the key, the key value must be
    /// unused under the key, and non-null foreign key values must name an existing
    /// record under their target key.
    pub fn insert_record(&self, key: &str, record: Record) -> Result<Cursor, Error> {
        self.catalog.require_key(key)?;
        let children = self.catalog.children_of(key)?;

        for field_value in &record.values {
            let child = children
                .iter()
                .find(|c| c.name == field_value.field)
                .ok_or_else(|| SchemaError::NotAChild {
                    field: field_value.field.clone(),
                    key: key.to_string(),
                })?;

            if let Some(target) = child.target() {
                if !field_value.value.is_null() && !self.has_key_value(target, &field_value.value)? {
                    return Err(SchemaError::DanglingReference {
                        field: child.name.clone(),
                        target: target.to_string(),
                        value: field_value.value.to_string(),
                    }
                    .into());
                }
            }
        }

        if self.has_key_value(key, &record.key)? {
            return Err(SchemaError::DuplicateRecord {
                key: key.to_string(),
                value: record.key.to_string(),
            }
            .into());
        }

        let row_id = self.db.generate_id()?;
        self.records_tree(key)?
            .insert(Cursor::encode_row(row_id), record.to_bytes()?)?;
        debug!(key = %key, row_id, "inserted record");

        Ok(Cursor::At(row_id))
    }

    /// Delete the record at `cursor` under a key field, returning it.
    pub fn delete_record(&self, key: &str, cursor: Cursor) -> Result<Record, Error> {
        self.catalog.require_key(key)?;
        let row_id = cursor.row_id().ok_or(Error::NotFound)?;

        match self.records_tree(key)?.remove(Cursor::encode_row(row_id))? {
            Some(bytes) => {
                debug!(key = %key, row_id, "deleted record");
                Record::from_bytes(&bytes)
            }
            None => Err(Error::NotFound),
        }
    }

    /// Get the record at `cursor` under a key field.
    pub fn get_record(&self, key: &str, cursor: Cursor) -> Result<Record, Error> {
        let row_id = cursor.row_id().ok_or(Error::NotFound)?;
        match self.records_tree(key)?.get(Cursor::encode_row(row_id))? {
            Some(bytes) => Record::from_bytes(&bytes),
            None => Err(Error::NotFound),
        }
    }

    /// Advance a cursor to the next record under a key field, in row id order.
    ///
    /// Works from any cursor, including one whose record has since been deleted.
    pub fn advance(&self, key: &str, cursor: Cursor) -> Result<Advance, Error> {
        self.catalog.require_key(key)?;
        let tree = self.records_tree(key)?;

        let next = match cursor {
            Cursor::Start => tree.first()?,
            Cursor::At(row_id) => tree
                .range((
                    Bound::Excluded(Cursor::encode_row(row_id)),
                    Bound::Unbounded,
                ))
                .next()
                .transpose()?,
        };

        match next {
            Some((row_key, _)) => Cursor::decode(&row_key)
                .map(Advance::Next)
                .ok_or(Error::InvalidKey),
            None => Ok(Advance::EndOfList),
        }
    }

    /// The value a field holds in the record at `cursor`.
    ///
    /// A key field yields the record's key value. A child field yields its stored
    /// value, or [`Value::Null`] if the child was created after the record.
    pub fn value(&self, field: &str, cursor: Cursor) -> Result<Value, Error> {
        let def = self.catalog.require(field)?;

        match &def.kind {
            FieldKind::Key => Ok(self.get_record(field, cursor)?.key),
            FieldKind::Item { parent } | FieldKind::ForeignKey { parent, .. } => {
                let record = self.get_record(parent, cursor)?;
                Ok(record.get(field).cloned().unwrap_or(Value::Null))
            }
        }
    }

    /// Number of records under a key field.
    pub fn record_count(&self, key: &str) -> Result<usize, Error> {
        self.catalog.require_key(key)?;
        Ok(self.records_tree(key)?.len())
    }

    /// Flush pending writes to disk.
    pub fn flush(&self) -> Result<(), Error> {
        self.db.flush()?;
        Ok(())
    }

    // ========== Helpers ==========

    fn next_position(&self) -> Result<u64, Error> {
        Ok(self.db.generate_id()?)
    }

    fn records_tree_name(key: &str) -> String {
        format!("{}{}", RECORDS_PREFIX, key)
    }

    fn records_tree(&self, key: &str) -> Result<Tree, Error> {
        Ok(self.db.open_tree(Self::records_tree_name(key))?)
    }

    /// Check whether any record under `key` has the given key value.
    fn has_key_value(&self, key: &str, value: &Value) -> Result<bool, Error> {
        for result in self.records_tree(key)?.iter() {
            let (_, bytes) = result?;
            if Record::from_bytes(&bytes)?.key == *value {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
