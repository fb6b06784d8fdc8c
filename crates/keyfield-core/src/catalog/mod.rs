//! Field catalog for keyfield.
//!
//! The catalog stores every field definition in the database: key fields and the
//! item and foreign key fields they own.

mod catalog;
mod field;
mod types;

pub use catalog::Catalog;
pub use field::{FieldDef, FieldKind};
pub use types::FieldType;
