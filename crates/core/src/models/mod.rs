pub mod record;
pub mod statistics;

pub use record::{GameRecord, NewGame};
pub use statistics::{RecordStatistics, WinRate};
