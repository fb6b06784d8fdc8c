//! Record cursors and row id encoding.

use std::fmt;

/// Size of an encoded row id in bytes.
pub const ROW_ID_SIZE: usize = 8;

/// A position in the record enumeration of one key field.
///
/// Row ids are encoded big-endian, so the lexicographic order of the record
/// tree matches numeric order and enumeration follows insertion order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Before the first record.
    #[default]
    Start,
    /// At the record with this row id.
    At(u64),
}

impl Cursor {
    /// The row id this cursor points at, if any.
    pub fn row_id(&self) -> Option<u64> {
        match self {
            Cursor::Start => None,
            Cursor::At(id) => Some(*id),
        }
    }

    /// Encode a row id as a record tree key.
    pub fn encode_row(row_id: u64) -> [u8; ROW_ID_SIZE] {
        row_id.to_be_bytes()
    }

    /// Decode a record tree key into a cursor.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let buf: [u8; ROW_ID_SIZE] = bytes.try_into().ok()?;
        Some(Cursor::At(u64::from_be_bytes(buf)))
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Start => write!(f, "Cursor(start)"),
            Cursor::At(id) => write!(f, "Cursor({})", id),
        }
    }
}

/// Outcome of advancing a cursor.
///
/// Reaching the end of the records is an ordinary outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The next record.
    Next(Cursor),
    /// No records remain.
    EndOfList,
}
