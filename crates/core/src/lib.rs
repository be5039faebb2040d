pub mod codec;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod models;
pub mod storage;
pub mod utils;

pub use codec::{Columns, decode, decode_with, encode, encode_with};
pub use config::{Backend, TrackerConfig};
pub use domain::{GameTracker, compute_statistics};
pub use error::{Error, Result};
pub use models::{GameRecord, NewGame, RecordStatistics, WinRate};
pub use storage::{CsvFileStorage, LocalStorage, Storage};
