//! Storage layer for keyfield.
//!
//! This module provides a sled-based storage engine: the field catalog plus one
//! record tree per key field, enumerated through cursors.

mod config;
mod cursor;
mod engine;
mod record;

pub use config::StorageConfig;
pub use cursor::{Advance, Cursor};
pub use engine::StorageEngine;
pub use record::{FieldValue, Record, Value};
