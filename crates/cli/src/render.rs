use nomercy_core::{GameRecord, RecordStatistics, WinRate};

const NOTES_WIDTH: usize = 40;

pub fn print_games(games: &[GameRecord]) {
    println!("Game History ({} games)", games.len());

    if games.is_empty() {
        println!("No games recorded yet. Add your first game with `nomercy add`!");
        return;
    }

    println!(
        "{:<15} {:<10} {:<12} {:<6} Notes",
        "Id", "Date", "Mercy", "Result"
    );

    for game in games.iter().rev() {
        println!("{}", game_row(game));
    }
}

pub fn game_row(game: &GameRecord) -> String {
    format!(
        "{:<15} {:<10} {:<12} {:<6} {}",
        game.id,
        game.date,
        if game.mercy_banned { "Banned" } else { "Not Banned" },
        if game.won { "Win" } else { "Loss" },
        notes_cell(&game.notes),
    )
}

fn notes_cell(notes: &str) -> String {
    if notes.is_empty() {
        return "-".to_string();
    }

    if notes.chars().count() > NOTES_WIDTH {
        let truncated: String = notes.chars().take(NOTES_WIDTH - 3).collect();
        format!("{truncated}...")
    } else {
        notes.to_string()
    }
}

pub fn print_statistics(stats: &RecordStatistics) {
    println!("Total Games:       {}", stats.total_games());
    println!("Mercy Banned:      {}", rate_line(&stats.mercy_banned));
    println!("Mercy Not Banned:  {}", rate_line(&stats.mercy_not_banned));
    println!("Overall Win Rate:  {}%", stats.overall);
}

fn rate_line(rate: &WinRate) -> String {
    format!("{} games, {}% win rate", rate.games, rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_row() {
        let game = GameRecord::new(42, "2024-01-01", true, false, "", "t");
        let row = game_row(&game);

        assert!(row.starts_with("42 "));
        assert!(row.contains("Banned"));
        assert!(row.contains("Loss"));
        assert!(row.ends_with(" -"));
    }

    #[test]
    fn test_long_notes_are_truncated() {
        let notes = "x".repeat(NOTES_WIDTH + 10);
        let cell = notes_cell(&notes);

        assert_eq!(cell.chars().count(), NOTES_WIDTH);
        assert!(cell.ends_with("..."));
    }

    #[test]
    fn test_rate_line() {
        let rate = WinRate { games: 3, wins: 1 };
        assert_eq!(rate_line(&rate), "3 games, 33.3% win rate");
        assert_eq!(rate_line(&WinRate::default()), "0 games, 0% win rate");
    }
}
