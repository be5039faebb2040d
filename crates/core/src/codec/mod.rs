//! Delimited-text document format for the record collection.
//!
//! ```text
//! id,date,mercyBanned,won,notes,timestamp
//! 1699999999000,2024-01-01,true,false,"quoted "" note",2024-01-01T00:00:00.000Z
//! ```
//!
//! The codec is pure: callers own reading and writing the document.

mod decoder;
mod encoder;

pub use decoder::{decode, decode_with, missing_columns};
pub use encoder::{encode, encode_with};

pub const DELIMITER: char = ',';
pub const QUOTE: char = '"';

pub const ID_COLUMN: &str = "id";
pub const DATE_COLUMN: &str = "date";
pub const NOTES_COLUMN: &str = "notes";
pub const TIMESTAMP_COLUMN: &str = "timestamp";

pub const DEFAULT_FLAG_LABEL: &str = "mercyBanned";
pub const DEFAULT_RESULT_LABEL: &str = "won";

/// Header labels of the document.
///
/// Only the flag and result columns are configurable; the other four names are fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    pub flag: String,
    pub result: String,
}

impl Columns {
    pub fn new(flag: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            result: result.into(),
        }
    }

    /// Column names in document order
    pub fn header(&self) -> [&str; 6] {
        [
            ID_COLUMN,
            DATE_COLUMN,
            &self.flag,
            &self.result,
            NOTES_COLUMN,
            TIMESTAMP_COLUMN,
        ]
    }
}

impl Default for Columns {
    fn default() -> Self {
        Self::new(DEFAULT_FLAG_LABEL, DEFAULT_RESULT_LABEL)
    }
}
