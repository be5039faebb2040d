use std::sync::Arc;

use rusqlite::{OptionalExtension, params};

use crate::db::Database;
use crate::error::Result;

/// Key/value access to the `local_storage` table
#[derive(Clone)]
pub struct LocalStorageDao {
    db: Arc<Database>,
}

impl LocalStorageDao {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.db.with_connection(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM local_storage WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;

            Ok(value)
        })
    }

    pub fn set_item(&self, key: &str, value: &str, updated_at: &str) -> Result<()> {
        self.db.transaction(|tx| {
            tx.execute(
                "INSERT INTO local_storage (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, value, updated_at],
            )?;
            Ok(())
        })
    }

    pub fn get_updated_at(&self, key: &str) -> Result<Option<String>> {
        self.db.with_connection(|conn| {
            let updated_at = conn
                .query_row(
                    "SELECT updated_at FROM local_storage WHERE key = ?1",
                    params![key],
                    |row| row.get::<_, Option<String>>(0),
                )
                .optional()?;

            Ok(updated_at.flatten())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    fn setup_test_db() -> Arc<Database> {
        let db_path = env::temp_dir().join(format!("test_local_storage_{}.db", uuid::Uuid::new_v4()));
        Arc::new(Database::open(&db_path).unwrap())
    }

    #[test]
    fn test_set_and_get_item() {
        let db = setup_test_db();
        let dao = LocalStorageDao::new(Arc::clone(&db));

        assert_eq!(dao.get_item("games").unwrap(), None);

        dao.set_item("games", "[]", "2024-01-01T00:00:00.000Z").unwrap();
        assert_eq!(dao.get_item("games").unwrap().as_deref(), Some("[]"));

        dao.set_item("games", "[1]", "2024-01-02T00:00:00.000Z").unwrap();
        assert_eq!(dao.get_item("games").unwrap().as_deref(), Some("[1]"));
        assert_eq!(
            dao.get_updated_at("games").unwrap().as_deref(),
            Some("2024-01-02T00:00:00.000Z")
        );

        std::fs::remove_file(db.path()).ok();
    }
}
