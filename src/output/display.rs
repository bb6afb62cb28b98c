//! Display functions for boards and command results

use super::formatters::{create_progress_bar, key_tile, share_grid, tile};
use crate::commands::SimulationResult;
use crate::core::{GRID_SIZE, MAX_TRIES, WORD_LENGTH};
use crate::game::{Game, Status, keyboard_layout};
use colored::Colorize;
use std::fmt::Write;

/// Grid and keyboard as colored text
#[must_use]
pub fn render_board(game: &Game) -> String {
    let mut out = String::new();

    for row_start in (0..GRID_SIZE).step_by(WORD_LENGTH) {
        out.push_str("  ");
        for index in row_start..row_start + WORD_LENGTH {
            let cell = game.cell_at(index);
            let _ = write!(out, "{}", tile(cell.letter, cell.evaluation));
            out.push(' ');
        }
        out.push('\n');
    }

    out.push('\n');
    for (i, row) in keyboard_layout().iter().enumerate() {
        out.push_str(&" ".repeat(i * 2));
        for &key in row {
            let _ = write!(out, "{}", key_tile(&key.label(), game.key_state(key)));
        }
        out.push('\n');
    }

    out
}

/// One line describing where the game stands
#[must_use]
pub fn status_line(game: &Game) -> String {
    match (game.status(), game.reveal()) {
        (Status::Won, _) => {
            let tries = game.tries_used();
            format!(
                "Solved in {tries} {}!",
                if tries == 1 { "guess" } else { "guesses" }
            )
        }
        (Status::Lost, Some(target)) => format!("Out of guesses. The word was {target}."),
        (Status::Lost, None) => "Out of guesses.".to_string(),
        (Status::Playing, _) => format!("Guess {} of {MAX_TRIES}", game.tries_used() + 1),
    }
}

/// Print the board with its status line
pub fn print_board(game: &Game) {
    println!("\n{}", render_board(game));

    let status = status_line(game);
    match game.status() {
        Status::Won => println!("{}", status.bright_green().bold()),
        Status::Lost => println!("{}", status.red().bold()),
        Status::Playing => println!("{}", status.bright_cyan()),
    }
    if game.status().is_over() {
        println!("\n{}", share_grid(game));
    }
}

/// Print the totals of a simulation
pub fn print_simulation_result(result: &SimulationResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SIMULATION RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    let percent = |count: usize| {
        if result.total_games == 0 {
            0.0
        } else {
            count as f64 / result.total_games as f64 * 100.0
        }
    };

    println!("\n📊 {}", "Games:".bright_cyan().bold());
    println!("   Played:           {}", result.total_games);
    println!(
        "   Won:              {} {}",
        result.won,
        format!("({:.1}%)", percent(result.won)).green()
    );
    println!(
        "   Lost:             {} {}",
        result.lost,
        format!("({:.1}%)", percent(result.lost)).red()
    );
    println!(
        "   Average guesses:  {}",
        format!("{:.2}", result.average_guesses())
            .bright_yellow()
            .bold()
    );

    println!("\n⌨️  {}", "Keys:".bright_cyan().bold());
    println!("   Pressed:          {}", result.keys_pressed);
    println!("   Ignored:          {}", result.ignored_keys);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    let max_count = result.guess_distribution.iter().copied().max().unwrap_or(0);
    for (i, &count) in result.guess_distribution.iter().enumerate() {
        let bar = create_progress_bar(count as f64, max_count as f64, 40);
        println!("   {}: {} {count:5}", i + 1, bar.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::game::Key;
    use crate::wordlists::Vocabulary;
    use crate::wordlists::loader::words_from_slice;

    fn vocabulary() -> Vocabulary {
        Vocabulary::new(
            words_from_slice(&["bumpy", "fjord", "swing", "latch", "crave", "nacre"]).unwrap(),
            words_from_slice(&["crane"]).unwrap(),
        )
        .unwrap()
    }

    fn play(game: &mut Game, vocabulary: &Vocabulary, word: &str) {
        for c in word.chars() {
            game.apply_key(Key::letter(c).unwrap(), vocabulary);
        }
        game.apply_key(Key::Submit, vocabulary);
    }

    #[test]
    fn board_shows_letters_and_keyboard() {
        colored::control::set_override(false);
        let vocabulary = vocabulary();
        let mut game = Game::with_target(Word::new("crane").unwrap());
        play(&mut game, &vocabulary, "bumpy");

        let board = render_board(&game);
        let lines: Vec<&str> = board.lines().collect();

        assert_eq!(lines[0], "   B   U   M   P   Y  ");
        assert!(lines[7].contains(" Q  W  E "));
        assert!(lines[9].contains("ENTER"));
        assert!(lines[9].contains("DEL"));
    }

    #[test]
    fn status_line_reveals_target_only_after_loss() {
        let vocabulary = vocabulary();
        let mut game = Game::with_target(Word::new("crane").unwrap());
        assert_eq!(status_line(&game), "Guess 1 of 6");

        for word in ["bumpy", "fjord", "swing", "latch", "crave", "nacre"] {
            play(&mut game, &vocabulary, word);
        }
        assert_eq!(status_line(&game), "Out of guesses. The word was CRANE.");
    }

    #[test]
    fn status_line_after_win() {
        let vocabulary = vocabulary();
        let mut game = Game::with_target(Word::new("crane").unwrap());
        play(&mut game, &vocabulary, "crane");

        assert_eq!(status_line(&game), "Solved in 1 guess!");
    }
}
