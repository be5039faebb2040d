//! Persistence boundary for the record collection.
//!
//! Both backends read and write the whole collection at once.

mod csv_file;
mod local;

pub use csv_file::CsvFileStorage;
pub use local::{DEFAULT_STORAGE_KEY, LocalStorage};

use crate::error::Result;
use crate::models::GameRecord;

pub trait Storage {
    /// Read the full collection. A store with nothing saved yet yields an empty collection.
    fn load(&self) -> Result<Vec<GameRecord>>;

    /// Replace the stored collection with `records`, all or nothing
    fn save(&self, records: &[GameRecord]) -> Result<()>;

    /// Human-readable description of where the data lives
    fn location(&self) -> String;

    /// ISO-8601 time of the last successful save, if the backend can tell
    fn last_saved(&self) -> Result<Option<String>> {
        Ok(None)
    }
}
