use chrono::Utc;
use tracing::debug;

use crate::domain::compute_statistics;
use crate::error::{Error, Result};
use crate::models::{GameRecord, NewGame, RecordStatistics};
use crate::storage::Storage;
use crate::utils::time::is_iso_date;

/// Owns the record collection and persists it after every mutation.
///
/// A mutation only takes effect in memory once the full collection has been saved.
pub struct GameTracker {
    storage: Box<dyn Storage>,
    games: Vec<GameRecord>,
}

impl GameTracker {
    /// Load the collection, failing if the store cannot be read
    pub fn open(storage: Box<dyn Storage>) -> Result<Self> {
        let games = storage.load()?;
        debug!("Tracker opened with {} games", games.len());

        Ok(Self { storage, games })
    }

    /// Load the collection, falling back to an empty one if the store cannot be read.
    ///
    /// The load error, if any, is handed back so the caller can report it.
    pub fn open_or_empty(storage: Box<dyn Storage>) -> (Self, Option<Error>) {
        match storage.load() {
            Ok(games) => (Self { storage, games }, None),
            Err(e) => {
                debug!("Load from {} failed, starting empty", storage.location());
                (
                    Self {
                        storage,
                        games: Vec::new(),
                    },
                    Some(e),
                )
            }
        }
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&GameRecord> {
        self.games.iter().find(|game| game.id == id)
    }

    pub fn location(&self) -> String {
        self.storage.location()
    }

    /// When the store was last written, if the backend knows
    pub fn last_saved(&self) -> Result<Option<String>> {
        self.storage.last_saved()
    }

    pub fn statistics(&self) -> RecordStatistics {
        compute_statistics(&self.games)
    }

    /// Record a new game, stamped with the current time
    pub fn add(&mut self, game: NewGame) -> Result<GameRecord> {
        if !is_iso_date(&game.date) {
            return Err(Error::InvalidInput(format!(
                "Date must be YYYY-MM-DD, got {:?}",
                game.date
            )));
        }

        if game.notes.contains(['\n', '\r']) {
            return Err(Error::InvalidInput(
                "Notes must fit on a single line".into(),
            ));
        }

        let record = game.into_record(Utc::now());

        let mut games = self.games.clone();
        games.push(record.clone());
        self.commit(games)?;

        Ok(record)
    }

    /// Remove every game with the given id
    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.ensure_exists(id)?;

        let games = self
            .games
            .iter()
            .filter(|game| game.id != id)
            .cloned()
            .collect();

        self.commit(games)
    }

    /// Flip win/loss for the game with the given id
    pub fn toggle_result(&mut self, id: i64) -> Result<()> {
        self.update(id, |game| game.won = !game.won)
    }

    /// Flip the mercy-ban flag for the game with the given id
    pub fn toggle_mercy_banned(&mut self, id: i64) -> Result<()> {
        self.update(id, |game| game.mercy_banned = !game.mercy_banned)
    }

    /// Re-save the whole collection. Returns the number of games written.
    pub fn save(&self) -> Result<usize> {
        self.storage.save(&self.games)?;

        Ok(self.games.len())
    }

    fn update<F>(&mut self, id: i64, f: F) -> Result<()>
    where
        F: Fn(&mut GameRecord),
    {
        self.ensure_exists(id)?;

        let mut games = self.games.clone();
        games.iter_mut().filter(|game| game.id == id).for_each(f);

        self.commit(games)
    }

    fn ensure_exists(&self, id: i64) -> Result<()> {
        if self.get(id).is_none() {
            return Err(Error::NotFound(format!("Game {}", id)));
        }

        Ok(())
    }

    fn commit(&mut self, games: Vec<GameRecord>) -> Result<()> {
        self.storage.save(&games)?;
        self.games = games;

        Ok(())
    }
}

impl std::fmt::Debug for GameTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameTracker")
            .field("location", &self.storage.location())
            .field("games", &self.games.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::storage::CsvFileStorage;

    /// In-memory store that can be told to fail
    #[derive(Default, Clone)]
    struct MemoryStorage {
        saved: Rc<RefCell<Vec<GameRecord>>>,
        fail_saves: Rc<Cell<bool>>,
        fail_loads: bool,
    }

    impl Storage for MemoryStorage {
        fn load(&self) -> Result<Vec<GameRecord>> {
            if self.fail_loads {
                return Err(Error::Io(std::io::Error::other("unreadable")));
            }
            Ok(self.saved.borrow().clone())
        }

        fn save(&self, records: &[GameRecord]) -> Result<()> {
            if self.fail_saves.get() {
                return Err(Error::Io(std::io::Error::other("disk full")));
            }
            *self.saved.borrow_mut() = records.to_vec();
            Ok(())
        }

        fn location(&self) -> String {
            "memory".to_string()
        }
    }

    fn tracker_with(storage: &MemoryStorage) -> GameTracker {
        GameTracker::open(Box::new(storage.clone())).unwrap()
    }

    fn seeded(storage: &MemoryStorage) -> GameTracker {
        *storage.saved.borrow_mut() = vec![
            GameRecord::new(1, "2024-01-01", true, true, "", "t1"),
            GameRecord::new(2, "2024-01-02", false, false, "lost badly", "t2"),
        ];
        tracker_with(storage)
    }

    #[test]
    fn test_add_appends_and_persists() {
        let storage = MemoryStorage::default();
        let mut tracker = tracker_with(&storage);

        let record = tracker
            .add(NewGame::default().with_date("2024-03-01").with_won(true))
            .unwrap();

        assert_ne!(record.id, 0);
        assert!(!record.timestamp.is_empty());
        assert_eq!(tracker.records(), std::slice::from_ref(&record));
        assert_eq!(*storage.saved.borrow(), vec![record]);
    }

    #[test]
    fn test_add_rejects_malformed_date() {
        let storage = MemoryStorage::default();
        let mut tracker = tracker_with(&storage);

        let err = tracker
            .add(NewGame::default().with_date("03/01/2024"))
            .unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_add_rejects_multiline_notes() {
        let storage = MemoryStorage::default();
        let mut tracker = tracker_with(&storage);

        for notes in ["line1\nline2", "line1\r\nline2", "trailing\r"] {
            let err = tracker
                .add(NewGame::default().with_date("2024-01-01").with_notes(notes))
                .unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "{notes:?} should be rejected");
        }

        assert!(tracker.is_empty());
        assert!(storage.saved.borrow().is_empty());
    }

    #[test]
    fn test_single_line_notes_survive_csv_reload() {
        let path = std::env::temp_dir()
            .join(format!("nomercy_tracker_{}", uuid::Uuid::new_v4()))
            .join("games-data.csv");

        let mut tracker = GameTracker::open(Box::new(CsvFileStorage::new(&path))).unwrap();
        let record = tracker
            .add(
                NewGame::default()
                    .with_date("2024-01-01")
                    .with_won(true)
                    .with_notes("line1, \"line2\""),
            )
            .unwrap();

        let reloaded = CsvFileStorage::new(&path).load().unwrap();
        assert_eq!(reloaded, vec![record]);

        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn test_delete_by_id() {
        let storage = MemoryStorage::default();
        let mut tracker = seeded(&storage);

        tracker.delete(1).unwrap();

        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.records()[0].id, 2);
        assert_eq!(storage.saved.borrow().len(), 1);
    }

    #[test]
    fn test_toggles() {
        let storage = MemoryStorage::default();
        let mut tracker = seeded(&storage);

        tracker.toggle_result(2).unwrap();
        tracker.toggle_mercy_banned(2).unwrap();

        let game = tracker.get(2).unwrap();
        assert!(game.won);
        assert!(game.mercy_banned);
        assert_eq!(tracker.statistics().mercy_banned.to_string(), "100.0");
        assert!(storage.saved.borrow()[1].won);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let storage = MemoryStorage::default();
        let mut tracker = seeded(&storage);

        assert!(tracker.delete(99).unwrap_err().is_not_found());
        assert!(tracker.toggle_result(99).unwrap_err().is_not_found());
        assert!(tracker.toggle_mercy_banned(99).unwrap_err().is_not_found());
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_failed_save_leaves_state_unchanged() {
        let storage = MemoryStorage::default();
        let mut tracker = seeded(&storage);
        storage.fail_saves.set(true);

        assert!(tracker.toggle_result(1).is_err());
        assert!(tracker.delete(2).is_err());
        assert!(tracker.add(NewGame::default()).is_err());

        assert_eq!(tracker.len(), 2);
        assert!(tracker.get(1).unwrap().won);
        assert!(tracker.save().is_err());
    }

    #[test]
    fn test_manual_save_returns_count() {
        let storage = MemoryStorage::default();
        let tracker = seeded(&storage);
        storage.saved.borrow_mut().clear();

        assert_eq!(tracker.save().unwrap(), 2);
        assert_eq!(storage.saved.borrow().len(), 2);
    }

    #[test]
    fn test_open_or_empty_reports_load_failure() {
        let storage = MemoryStorage {
            fail_loads: true,
            ..Default::default()
        };

        let (tracker, err) = GameTracker::open_or_empty(Box::new(storage.clone()));
        assert!(tracker.is_empty());
        assert!(matches!(err, Some(Error::Io(_))));

        assert!(GameTracker::open(Box::new(storage)).is_err());
    }
}
