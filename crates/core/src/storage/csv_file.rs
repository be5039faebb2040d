use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use tracing::debug;

use super::Storage;
use crate::codec::{Columns, decode_with, encode_with, missing_columns};
use crate::error::{Error, Result};
use crate::models::GameRecord;
use crate::utils::time::iso_timestamp;

/// Stores the collection as a delimited-text document on disk
#[derive(Debug, Clone)]
pub struct CsvFileStorage {
    path: PathBuf,
    columns: Columns,
}

impl CsvFileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_columns(path, Columns::default())
    }

    pub fn with_columns<P: AsRef<Path>>(path: P, columns: Columns) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            columns,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl Storage for CsvFileStorage {
    fn load(&self) -> Result<Vec<GameRecord>> {
        let document = match fs::read_to_string(&self.path) {
            Ok(document) => document,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No document at {:?} yet, starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        // Reading under the wrong labels would drop those columns on the next save
        let missing = missing_columns(&document, &self.columns);
        if !missing.is_empty() {
            return Err(Error::InvalidInput(format!(
                "{:?} has no {} column",
                self.path,
                missing.join(" or ")
            )));
        }

        let records = decode_with(&document, &self.columns);
        debug!("Loaded {} games from {:?}", records.len(), self.path);

        Ok(records)
    }

    fn save(&self, records: &[GameRecord]) -> Result<()> {
        let document = encode_with(records, &self.columns);

        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        // Write next to the target so the rename stays on one filesystem
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(document.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;

        debug!("Saved {} games to {:?}", records.len(), self.path);

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn last_saved(&self) -> Result<Option<String>> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(Some(iso_timestamp(DateTime::<Utc>::from(meta.modified()?)))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
