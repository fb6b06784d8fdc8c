//! Core type definitions for the catalog.

use rkyv::{Archive, Deserialize, Serialize};
use std::fmt;

/// The closed set of field kinds a database can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
pub enum FieldType {
    /// A key field: groups child fields and owns records.
    Key,
    /// A plain value held once per record.
    Item,
    /// A value that identifies a record under another key field.
    ForeignKey,
}

impl FieldType {
    /// Check if this is the key type.
    pub fn is_key(&self) -> bool {
        matches!(self, FieldType::Key)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Key => write!(f, "KEY"),
            FieldType::Item => write!(f, "ITEM"),
            FieldType::ForeignKey => write!(f, "FOREIGN_KEY"),
        }
    }
}
