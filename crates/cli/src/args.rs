use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use nomercy_core::Backend;
use nomercy_core::codec::{DEFAULT_FLAG_LABEL, DEFAULT_RESULT_LABEL};

#[derive(Parser, Debug)]
#[command(
    name = "nomercy",
    version,
    about = "Track your Overwatch games and Mercy ban effectiveness"
)]
pub struct Args {
    /// Directory holding the games data (defaults to the platform data directory)
    #[arg(long, env = "NOMERCY_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Where games are persisted
    #[arg(long, env = "NOMERCY_BACKEND", value_enum, default_value_t = BackendArg::Csv, global = true)]
    pub backend: BackendArg,

    /// Header label of the mercy-ban column in the CSV document
    #[arg(long, default_value = DEFAULT_FLAG_LABEL, global = true)]
    pub flag_label: String,

    /// Header label of the result column in the CSV document
    #[arg(long, default_value = DEFAULT_RESULT_LABEL, global = true)]
    pub result_label: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new game
    Add {
        /// Game date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// The team voted to ban Mercy
        #[arg(long)]
        banned: bool,

        /// The game was won
        #[arg(long)]
        won: bool,

        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Show game history, newest first
    List,

    /// Delete a game by id
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Flip a game between win and loss
    ToggleResult {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Flip whether Mercy was banned in a game
    ToggleBanned {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Show win rates with and without the Mercy ban
    Stats,

    /// Re-save every game to the data store
    Save,

    /// Show version, data location and game count
    Info,

    /// Print the games as a CSV document
    Export,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendArg {
    Csv,
    Local,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Csv => Backend::Csv,
            BackendArg::Local => Backend::Local,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let args = Args::parse_from([
            "nomercy", "add", "--date", "2024-01-01", "--banned", "--notes", "gg",
        ]);

        match args.command {
            Command::Add {
                date,
                banned,
                won,
                notes,
            } => {
                assert_eq!(date.as_deref(), Some("2024-01-01"));
                assert!(banned);
                assert!(!won);
                assert_eq!(notes, "gg");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_backend_after_subcommand() {
        let args = Args::parse_from(["nomercy", "stats", "--backend", "local"]);

        assert_eq!(args.backend, BackendArg::Local);
        assert!(matches!(args.command, Command::Stats));
    }

    #[test]
    fn test_parse_delete_id() {
        let args = Args::parse_from(["nomercy", "delete", "1699999999000"]);
        assert!(matches!(args.command, Command::Delete { id: 1_699_999_999_000 }));
    }
}
