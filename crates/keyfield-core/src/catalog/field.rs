//! Field definitions.

use super::types::FieldType;
use crate::error::Error;
use rkyv::util::AlignedVec;
use rkyv::{Archive, Deserialize, Serialize};

/// A field definition in the database catalog.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name, unique across the whole database.
    pub name: String,
    /// Kind-specific data.
    pub kind: FieldKind,
    /// Creation sequence number. Children of a key are listed in this order.
    pub position: u64,
}

/// What a field is, plus the links that kind carries.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub enum FieldKind {
    /// A key field.
    Key,
    /// An item owned by `parent`.
    Item {
        /// Name of the owning key field.
        parent: String,
    },
    /// A foreign key owned by `parent`, pointing at the key field `target`.
    ForeignKey {
        /// Name of the owning key field.
        parent: String,
        /// Name of the referenced key field.
        target: String,
    },
}

impl FieldDef {
    /// Create a key field definition.
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Key,
            position: 0,
        }
    }

    /// Create an item field owned by `parent`.
    pub fn item(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Item {
                parent: parent.into(),
            },
            position: 0,
        }
    }

    /// Create a foreign key field owned by `parent` that points at `target`.
    pub fn foreign_key(
        name: impl Into<String>,
        parent: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::ForeignKey {
                parent: parent.into(),
                target: target.into(),
            },
            position: 0,
        }
    }

    /// Set the creation sequence number.
    pub fn at_position(mut self, position: u64) -> Self {
        self.position = position;
        self
    }

    /// The type tag of this field.
    pub fn field_type(&self) -> FieldType {
        match self.kind {
            FieldKind::Key => FieldType::Key,
            FieldKind::Item { .. } => FieldType::Item,
            FieldKind::ForeignKey { .. } => FieldType::ForeignKey,
        }
    }

    /// Check if this is a key field.
    pub fn is_key(&self) -> bool {
        self.field_type().is_key()
    }

    /// The owning key field, for child fields.
    pub fn parent(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Key => None,
            FieldKind::Item { parent } | FieldKind::ForeignKey { parent, .. } => Some(parent),
        }
    }

    /// The referenced key field, for foreign keys.
    pub fn target(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::ForeignKey { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Serialize the definition to bytes using rkyv.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        rkyv::to_bytes::<rkyv::rancor::Error>(self)
            .map(|v| v.to_vec())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize a definition from bytes using rkyv.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        // sled hands back buffers with no alignment guarantee
        let mut aligned = AlignedVec::<16>::new();
        aligned.extend_from_slice(bytes);
        rkyv::from_bytes::<Self, rkyv::rancor::Error>(&aligned)
            .map_err(|e| Error::Deserialization(e.to_string()))
    }
}
