//! Core error types.

use thiserror::Error;

/// Core database errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage layer error.
    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),

    /// Schema rule violated by a field or record mutation.
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Key decoding error.
    #[error("invalid key format")]
    InvalidKey,

    /// Record not found.
    #[error("record not found")]
    NotFound,
}

/// Schema rule violations reported by the catalog and the storage engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A field with this name already exists somewhere in the database.
    #[error("field '{0}' already exists")]
    DuplicateField(String),

    /// No field with this name exists.
    #[error("field '{0}' does not exist")]
    UnknownField(String),

    /// The named field exists but is not a key field.
    #[error("field '{0}' is not a key field")]
    NotAKey(String),

    /// A record referenced a field that is not a direct child of its key.
    #[error("field '{field}' is not a child of key '{key}'")]
    NotAChild {
        /// The offending field.
        field: String,
        /// The key the record belongs to.
        key: String,
    },

    /// A key field cannot be deleted while it still owns child fields.
    #[error("key '{0}' still has child fields")]
    HasChildren(String),

    /// A key field cannot be deleted while a foreign key points at it.
    #[error("key '{key}' is referenced by foreign key '{by}'")]
    Referenced {
        /// The key being deleted.
        key: String,
        /// The foreign key that points at it.
        by: String,
    },

    /// A record with the same key value already exists under the key.
    #[error("record '{value}' already exists under key '{key}'")]
    DuplicateRecord {
        /// The key field.
        key: String,
        /// The duplicated key value.
        value: String,
    },

    /// A foreign key value does not match any record under its target key.
    #[error("foreign key '{field}' has no record '{value}' under key '{target}'")]
    DanglingReference {
        /// The foreign key field.
        field: String,
        /// The target key field.
        target: String,
        /// The unmatched value.
        value: String,
    },
}
