use std::fmt;

use crate::models::GameRecord;

/// Win rate over one subset of the collection
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WinRate {
    pub games: usize,
    pub wins: usize,
}

impl WinRate {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a GameRecord>) -> Self {
        records.into_iter().fold(Self::default(), |acc, record| Self {
            games: acc.games + 1,
            wins: acc.wins + usize::from(record.won),
        })
    }

    /// Percentage of games won, rounded to one decimal place. Zero for an empty subset.
    pub fn percentage(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }

        let raw = self.wins as f64 / self.games as f64 * 100.0;
        (raw * 10.0).round() / 10.0
    }
}

impl fmt::Display for WinRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.games == 0 {
            write!(f, "0")
        } else {
            write!(f, "{:.1}", self.percentage())
        }
    }
}

/// Aggregate statistics derived from the full collection
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecordStatistics {
    pub mercy_banned: WinRate,
    pub mercy_not_banned: WinRate,
    pub overall: WinRate,
}

impl RecordStatistics {
    pub fn total_games(&self) -> usize {
        self.overall.games
    }
}
