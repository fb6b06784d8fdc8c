//! Record and value types for stored rows.

use crate::error::Error;
use rkyv::util::AlignedVec;
use rkyv::{Archive, Deserialize, Serialize};
use std::fmt;

/// A single stored value.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub enum Value {
    /// No value. Displays as the empty string.
    Null,
    /// 64-bit signed integer.
    Int(i64),
    /// UTF-8 text.
    Text(String),
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(i) => write!(f, "{}", i),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

/// The value one child field holds in a record.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct FieldValue {
    /// Child field name.
    pub field: String,
    /// Stored value.
    pub value: Value,
}

/// A stored row under a key field.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct Record {
    /// The record's value for the key field itself.
    pub key: Value,

    /// Values for child fields. Children created after the record are absent.
    pub values: Vec<FieldValue>,
}

impl Record {
    /// Create a record with the given key value and no child values.
    pub fn new(key: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            values: Vec::new(),
        }
    }

    /// Add a child field value.
    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a child field value, replacing any previous one.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        match self.values.iter_mut().find(|v| v.field == field) {
            Some(existing) => existing.value = value,
            None => self.values.push(FieldValue { field, value }),
        }
    }

    /// Get a child field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|v| v.field == field)
            .map(|v| &v.value)
    }

    /// Drop a child field value. Returns true if one was present.
    pub fn remove(&mut self, field: &str) -> bool {
        let before = self.values.len();
        self.values.retain(|v| v.field != field);
        self.values.len() != before
    }

    /// Serialize the record to bytes using rkyv.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        rkyv::to_bytes::<rkyv::rancor::Error>(self)
            .map(|v| v.to_vec())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize a record from bytes using rkyv.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let mut aligned = AlignedVec::<16>::new();
        aligned.extend_from_slice(bytes);
        rkyv::from_bytes::<Self, rkyv::rancor::Error>(&aligned)
            .map_err(|e| Error::Deserialization(e.to_string()))
    }
}
