use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::codec::Columns;
use crate::error::{Error, Result};
use crate::storage::{CsvFileStorage, LocalStorage, Storage};

pub const APP_DIR_NAME: &str = "nomercy-tracker";
pub const CSV_FILENAME: &str = "games-data.csv";
pub const STORAGE_DB_FILENAME: &str = "storage.db";
pub use crate::storage::DEFAULT_STORAGE_KEY;

/// Which persistence backend holds the collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    #[default]
    Csv,
    Local,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Local => write!(f, "local"),
        }
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" | "file" => Ok(Self::Csv),
            "local" | "local-storage" => Ok(Self::Local),
            other => Err(Error::InvalidInput(format!("Unknown backend: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub data_dir: PathBuf,
    pub backend: Backend,
    pub csv_filename: String,
    pub storage_db_filename: String,
    pub storage_key: String,
    pub columns: Columns,
}

impl TrackerConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            backend: Backend::default(),
            csv_filename: CSV_FILENAME.to_string(),
            storage_db_filename: STORAGE_DB_FILENAME.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            columns: Columns::default(),
        }
    }

    /// Platform data directory, e.g. `~/.local/share/nomercy-tracker` on Linux
    pub fn default_data_dir() -> Result<PathBuf> {
        let dir = dirs::data_dir().ok_or_else(|| {
            Error::NotFound("Unable to determine data directory for your platform".into())
        })?;

        Ok(dir.join(APP_DIR_NAME))
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;

        self
    }

    pub fn with_columns(mut self, columns: Columns) -> Self {
        self.columns = columns;

        self
    }

    pub fn csv_path(&self) -> PathBuf {
        self.data_dir.join(&self.csv_filename)
    }

    pub fn storage_db_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage_db_filename)
    }

    /// Build the configured storage backend
    pub fn open_storage(&self) -> Result<Box<dyn Storage>> {
        let storage: Box<dyn Storage> = match self.backend {
            Backend::Csv => Box::new(CsvFileStorage::with_columns(
                self.csv_path(),
                self.columns.clone(),
            )),
            Backend::Local => Box::new(LocalStorage::open(
                self.storage_db_path(),
                self.storage_key.clone(),
            )?),
        };

        Ok(storage)
    }
}
