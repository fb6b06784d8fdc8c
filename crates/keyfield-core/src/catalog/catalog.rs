//! Catalog manager for storing and retrieving field definitions.

use super::{FieldDef, FieldType};
use crate::error::{Error, SchemaError};
use sled::{Db, Tree};

/// Tree name for field definitions.
const FIELDS_TREE: &str = "catalog:fields";

/// The catalog of every field in the database, keyed by name.
pub struct Catalog {
    /// Field definitions tree (name -> FieldDef).
    fields_tree: Tree,
}

impl Catalog {
    /// Open or create a catalog using the given sled database.
    pub fn open(db: &Db) -> Result<Self, Error> {
        let fields_tree = db.open_tree(FIELDS_TREE)?;
        Ok(Self { fields_tree })
    }

    /// Get a field definition by name.
    pub fn get(&self, name: &str) -> Result<Option<FieldDef>, Error> {
        match self.fields_tree.get(name.as_bytes())? {
            Some(bytes) => Ok(Some(FieldDef::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Get a field definition by name, failing if it is missing.
    pub fn require(&self, name: &str) -> Result<FieldDef, Error> {
        self.get(name)?
            .ok_or_else(|| SchemaError::UnknownField(name.to_string()).into())
    }

    /// Get a key field definition by name, failing if it is missing or not a key.
    pub fn require_key(&self, name: &str) -> Result<FieldDef, Error> {
        let def = self.require(name)?;
        if !def.is_key() {
            return Err(SchemaError::NotAKey(name.to_string()).into());
        }
        Ok(def)
    }

    /// Check whether a field with this name exists.
    pub fn contains(&self, name: &str) -> Result<bool, Error> {
        Ok(self.fields_tree.contains_key(name.as_bytes())?)
    }

    /// All fields in creation order.
    pub fn all_fields(&self) -> Result<Vec<FieldDef>, Error> {
        let mut fields = Vec::new();
        for result in self.fields_tree.iter() {
            let (_, value) = result?;
            fields.push(FieldDef::from_bytes(&value)?);
        }
        fields.sort_by_key(|f| f.position);
        Ok(fields)
    }

    /// All key fields in creation order.
    pub fn all_keys(&self) -> Result<Vec<FieldDef>, Error> {
        Ok(self
            .all_fields()?
            .into_iter()
            .filter(|f| f.field_type() == FieldType::Key)
            .collect())
    }

    /// Direct children of a key field in creation order.
    pub fn children_of(&self, key: &str) -> Result<Vec<FieldDef>, Error> {
        Ok(self
            .all_fields()?
            .into_iter()
            .filter(|f| f.parent() == Some(key))
            .collect())
    }

    /// Foreign keys that point at the given key field.
    pub fn references_to(&self, key: &str) -> Result<Vec<FieldDef>, Error> {
        Ok(self
            .all_fields()?
            .into_iter()
            .filter(|f| f.target() == Some(key))
            .collect())
    }

    /// Insert a new field definition.
    ///
    /// Fails with [`SchemaError::DuplicateField`] if the name is already taken.
    pub fn insert(&self, def: &FieldDef) -> Result<(), Error> {
        let value = def.to_bytes()?;
        match self
            .fields_tree
            .compare_and_swap(def.name.as_bytes(), None as Option<&[u8]>, Some(value))?
        {
            Ok(()) => Ok(()),
            Err(_) => Err(SchemaError::DuplicateField(def.name.clone()).into()),
        }
    }

    /// Remove a field definition, returning it if it existed.
    pub fn remove(&self, name: &str) -> Result<Option<FieldDef>, Error> {
        match self.fields_tree.remove(name.as_bytes())? {
            Some(bytes) => Ok(Some(FieldDef::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }
}
