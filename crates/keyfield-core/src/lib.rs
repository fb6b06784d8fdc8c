//! keyfield core - field catalog, record storage, and cursor enumeration.
//!
//! A keyfield database is a flat set of uniquely named fields. Key fields own
//! item and foreign key fields, and hold records that are enumerated through
//! [`Cursor`]s.

pub mod catalog;
pub mod error;
pub mod storage;
pub mod store;

pub use catalog::{Catalog, FieldDef, FieldKind, FieldType};
pub use error::{Error, SchemaError};
pub use storage::{Advance, Cursor, FieldValue, Record, StorageConfig, StorageEngine, Value};
pub use store::KeyStore;
