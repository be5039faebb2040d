use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use super::Storage;
use crate::db::{Database, LocalStorageDao};
use crate::error::Result;
use crate::models::GameRecord;
use crate::utils::time::{generate_id, iso_timestamp};

pub const DEFAULT_STORAGE_KEY: &str = "overwatchGames";

/// Stores the collection as one JSON value under a single key of a local key/value store
#[derive(Clone)]
pub struct LocalStorage {
    db: Arc<Database>,
    dao: LocalStorageDao,
    key: String,
}

impl LocalStorage {
    pub fn new(db: Arc<Database>, key: impl Into<String>) -> Self {
        Self {
            dao: LocalStorageDao::new(Arc::clone(&db)),
            db,
            key: key.into(),
        }
    }

    /// Open (creating if needed) the store at `path`
    pub fn open<P: AsRef<Path>>(path: P, key: impl Into<String>) -> Result<Self> {
        let db = Database::open(path)?;
        Ok(Self::new(Arc::new(db), key))
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Storage for LocalStorage {
    fn load(&self) -> Result<Vec<GameRecord>> {
        let Some(value) = self.dao.get_item(&self.key)? else {
            debug!("Nothing stored under {:?} yet, starting empty", self.key);
            return Ok(Vec::new());
        };

        let mut records: Vec<GameRecord> = serde_json::from_str(&value)?;

        for record in records.iter_mut().filter(|r| r.id == 0) {
            record.id = generate_id();
            warn!("Stored game without an id, assigned {}", record.id);
        }

        debug!("Loaded {} games from local storage", records.len());

        Ok(records)
    }

    fn save(&self, records: &[GameRecord]) -> Result<()> {
        let value = serde_json::to_string(records)?;
        self.dao
            .set_item(&self.key, &value, &iso_timestamp(Utc::now()))?;

        debug!("Saved {} games to local storage", records.len());

        Ok(())
    }

    fn location(&self) -> String {
        format!("{} [{}]", self.db.path().display(), self.key)
    }

    fn last_saved(&self) -> Result<Option<String>> {
        self.dao.get_updated_at(&self.key)
    }
}

impl std::fmt::Debug for LocalStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStorage")
            .field("db", &self.db)
            .field("key", &self.key)
            .finish()
    }
}
