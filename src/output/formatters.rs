//! Formatting utilities for terminal output

use crate::core::{Evaluation, MAX_TRIES, WORD_LENGTH};
use crate::game::{Game, Status};
use colored::{ColoredString, Colorize};

/// Emoji square for an evaluation
#[must_use]
pub const fn evaluation_to_emoji(evaluation: Evaluation) -> char {
    match evaluation {
        Evaluation::Correct => '🟩',
        Evaluation::Present => '🟨',
        Evaluation::Absent => '⬛',
        Evaluation::Unknown => '⬜',
        Evaluation::Empty => '·',
    }
}

/// Format one scored row as emoji
#[must_use]
pub fn row_to_emoji(evaluations: &[Evaluation; WORD_LENGTH]) -> String {
    evaluations.iter().copied().map(evaluation_to_emoji).collect()
}

/// Spoiler-free summary of a game, one emoji row per guess
#[must_use]
pub fn share_grid(game: &Game) -> String {
    let score = match game.status() {
        Status::Won => game.tries_used().to_string(),
        Status::Lost => "X".to_string(),
        Status::Playing => "-".to_string(),
    };

    let mut grid = format!("Wordle {score}/{MAX_TRIES}");
    for (_, evaluations) in game.rows() {
        grid.push('\n');
        grid.push_str(&row_to_emoji(&evaluations));
    }
    grid
}

/// A grid letter drawn as a colored tile
#[must_use]
pub fn tile(letter: Option<char>, evaluation: Evaluation) -> ColoredString {
    paint(format!(" {} ", letter.unwrap_or(' ')), evaluation)
}

/// An on-screen keyboard key colored by what is known about it
#[must_use]
pub fn key_tile(label: &str, evaluation: Evaluation) -> ColoredString {
    paint(format!(" {label} "), evaluation)
}

fn paint(text: String, evaluation: Evaluation) -> ColoredString {
    match evaluation {
        Evaluation::Correct => text.black().on_green().bold(),
        Evaluation::Present => text.black().on_yellow().bold(),
        Evaluation::Absent => text.white().on_bright_black(),
        Evaluation::Unknown => text.bright_white().bold(),
        Evaluation::Empty => text.normal(),
    }
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 {
        // Clamped to [0, width] below
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::game::Key;
    use crate::wordlists::Vocabulary;
    use crate::wordlists::loader::words_from_slice;

    fn play(game: &mut Game, vocabulary: &Vocabulary, word: &str) {
        for c in word.chars() {
            game.apply_key(Key::letter(c).unwrap(), vocabulary);
        }
        game.apply_key(Key::Submit, vocabulary);
    }

    #[test]
    fn emoji_row_follows_evaluations() {
        use Evaluation::{Absent, Correct, Present};
        assert_eq!(
            row_to_emoji(&[Correct, Present, Absent, Absent, Correct]),
            "🟩🟨⬛⬛🟩"
        );
    }

    #[test]
    fn share_grid_for_won_game() {
        let vocabulary = Vocabulary::new(
            words_from_slice(&["crate"]).unwrap(),
            words_from_slice(&["crane"]).unwrap(),
        )
        .unwrap();
        let mut game = Game::with_target(Word::new("crane").unwrap());
        play(&mut game, &vocabulary, "crate");
        play(&mut game, &vocabulary, "crane");

        assert_eq!(share_grid(&game), "Wordle 2/6\n🟩🟩🟩⬛🟩\n🟩🟩🟩🟩🟩");
    }

    #[test]
    fn share_grid_for_fresh_game() {
        let game = Game::with_target(Word::new("crane").unwrap());
        assert_eq!(share_grid(&game), "Wordle -/6");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_with_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }
}
