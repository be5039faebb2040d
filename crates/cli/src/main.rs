mod args;
mod render;

use anyhow::{Context, Result, bail};
use clap::Parser;
use nomercy_core::{Columns, GameTracker, NewGame, TrackerConfig, encode_with};
use tracing::{debug, warn};

use crate::args::{Args, Command};

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    debug!("Using {} backend in {:?}", config.backend, config.data_dir);

    let storage = config
        .open_storage()
        .with_context(|| format!("Failed to open {} storage", config.backend))?;
    let (mut tracker, load_error) = GameTracker::open_or_empty(storage);

    // Mutating commands report the load error themselves when they refuse to run
    if is_read_only(&args.command) && let Some(e) = &load_error {
        eprintln!(
            "Warning: could not load games from {}: {}",
            tracker.location(),
            e
        );
    }

    match args.command {
        Command::List => render::print_games(tracker.records()),
        Command::Stats => render::print_statistics(&tracker.statistics()),
        Command::Info => {
            println!("No Mercy Tracker v{}", env!("CARGO_PKG_VERSION"));
            println!("Data:         {}", tracker.location());
            println!("Games Loaded: {}", if load_error.is_none() { "Yes" } else { "No" });
            println!("Games Count:  {}", tracker.len());
            match tracker.last_saved() {
                Ok(Some(saved)) => println!("Last Saved:   {saved}"),
                Ok(None) => println!("Last Saved:   never"),
                Err(e) => println!("Last Saved:   unknown ({e})"),
            }
        }
        Command::Export => {
            let document = encode_with(tracker.records(), &config.columns);
            if !document.is_empty() {
                println!("{document}");
            }
        }
        command => {
            if let Some(e) = load_error {
                bail!(
                    "Refusing to modify games that could not be loaded from {}: {}",
                    tracker.location(),
                    e
                );
            }
            apply(&mut tracker, command)?;
        }
    }

    Ok(())
}

fn is_read_only(command: &Command) -> bool {
    matches!(
        command,
        Command::List | Command::Stats | Command::Info | Command::Export
    )
}

fn build_config(args: &Args) -> Result<TrackerConfig> {
    let data_dir = match &args.data_dir {
        Some(dir) => dir.clone(),
        None => TrackerConfig::default_data_dir()?,
    };

    Ok(TrackerConfig::new(data_dir)
        .with_backend(args.backend.into())
        .with_columns(Columns::new(&args.flag_label, &args.result_label)))
}

fn apply(tracker: &mut GameTracker, command: Command) -> Result<()> {
    match command {
        Command::Add {
            date,
            banned,
            won,
            notes,
        } => {
            let mut game = NewGame::default()
                .with_mercy_banned(banned)
                .with_won(won)
                .with_notes(notes);
            if let Some(date) = date {
                game = game.with_date(date);
            }

            let record = tracker.add(game).context("Failed to add game")?;
            println!("Added game {}", record.id);
            println!("{}", render::game_row(&record));
        }
        Command::Delete { id } => {
            tracker.delete(id).context("Failed to delete game")?;
            println!("Deleted game {id}");
        }
        Command::ToggleResult { id } => {
            tracker.toggle_result(id).context("Failed to update game")?;
            if let Some(game) = tracker.get(id) {
                println!("{}", render::game_row(game));
            }
        }
        Command::ToggleBanned { id } => {
            tracker
                .toggle_mercy_banned(id)
                .context("Failed to update game")?;
            if let Some(game) = tracker.get(id) {
                println!("{}", render::game_row(game));
            }
        }
        Command::Save => match tracker.save() {
            Ok(count) => println!("Saved {count} games successfully"),
            Err(e) => {
                warn!("Manual save failed: {}", e);
                bail!("Save failed: {e}");
            }
        },
        Command::List | Command::Stats | Command::Info | Command::Export => {}
    }

    Ok(())
}
