use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::time::{epoch_millis, iso_timestamp, today};

/// One tracked game outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameRecord {
    pub id: i64,
    pub date: String,
    pub mercy_banned: bool,
    pub won: bool,
    pub notes: String,
    pub timestamp: String,

    /// Columns read from a document whose header names are not recognized.
    /// Never written back out.
    #[serde(skip)]
    pub extra: BTreeMap<String, String>,
}

impl GameRecord {
    pub fn new(
        id: i64,
        date: impl Into<String>,
        mercy_banned: bool,
        won: bool,
        notes: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date: date.into(),
            mercy_banned,
            won,
            notes: notes.into(),
            timestamp: timestamp.into(),
            extra: BTreeMap::new(),
        }
    }
}

/// User-supplied part of a record, before an id and timestamp are assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub date: String,
    pub mercy_banned: bool,
    pub won: bool,
    pub notes: String,
}

impl NewGame {
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();

        self
    }

    pub fn with_mercy_banned(mut self, mercy_banned: bool) -> Self {
        self.mercy_banned = mercy_banned;

        self
    }

    pub fn with_won(mut self, won: bool) -> Self {
        self.won = won;

        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();

        self
    }

    /// Stamp the game with an id and creation timestamp derived from `now`
    pub fn into_record(self, now: DateTime<Utc>) -> GameRecord {
        GameRecord::new(
            epoch_millis(now),
            self.date,
            self.mercy_banned,
            self.won,
            self.notes,
            iso_timestamp(now),
        )
    }
}

impl Default for NewGame {
    fn default() -> Self {
        Self {
            date: today(),
            mercy_banned: false,
            won: false,
            notes: String::new(),
        }
    }
}
