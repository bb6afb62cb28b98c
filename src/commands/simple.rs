//! Simple interactive CLI mode
//!
//! Line-based game without the full-screen UI. Each line typed is fed to the
//! engine as letter keys followed by `Submit`.

use super::session::{GameStore, load_game, save_game, start_new_game};
use crate::core::WORD_LENGTH;
use crate::game::{Game, Key, Status};
use crate::output::display::{render_board, status_line};
use crate::output::formatters::share_grid;
use crate::wordlists::Vocabulary;
use anyhow::Result;
use colored::Colorize;
use rand::Rng;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Run the simple interactive CLI mode on stdin/stdout
///
/// # Errors
///
/// Returns an error if there's an I/O error on the terminal or the store.
pub fn run_simple<S: GameStore + ?Sized>(store: &mut S, vocabulary: &Vocabulary) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    play_lines(
        store,
        vocabulary,
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut rand::rng(),
    )
}

/// Game loop over arbitrary line input and output
///
/// Ends on `quit`, on end of input, or when the player declines another game.
///
/// # Errors
///
/// Returns an error if reading, writing, or the store fails.
pub fn play_lines<S, I, O, R>(
    store: &mut S,
    vocabulary: &Vocabulary,
    input: &mut I,
    output: &mut O,
    rng: &mut R,
) -> Result<()>
where
    S: GameStore + ?Sized,
    I: BufRead,
    O: Write,
    R: Rng + ?Sized,
{
    writeln!(output, "\n╔══════════════════════════════════════════════════════════════╗")?;
    writeln!(output, "║                        W O R D L E                           ║")?;
    writeln!(output, "╚══════════════════════════════════════════════════════════════╝\n")?;
    writeln!(output, "Type a five-letter word and press Enter to guess.")?;
    writeln!(output, "Commands: 'quit' to exit, 'new' for a new game\n")?;

    let mut game = load_game(store, vocabulary, rng)?;

    loop {
        writeln!(output, "{}", render_board(&game))?;

        if game.status().is_over() {
            print_game_over(output, &game)?;

            let Some(answer) = prompt(input, output, "Play again? (yes/no)")? else {
                return Ok(());
            };
            if matches!(answer.to_lowercase().as_str(), "yes" | "y") {
                game = start_new_game(store, vocabulary, rng)?;
                writeln!(output, "\n🔄 New game started!\n")?;
                continue;
            }
            writeln!(output, "\n👋 Thanks for playing!\n")?;
            return Ok(());
        }

        writeln!(output, "{}", status_line(&game).bright_cyan())?;
        let Some(line) = prompt(input, output, "Guess")? else {
            return Ok(());
        };

        match line.to_lowercase().as_str() {
            "quit" | "q" | "exit" => {
                writeln!(output, "\n👋 Thanks for playing!\n")?;
                return Ok(());
            }
            "new" | "n" => {
                game = start_new_game(store, vocabulary, rng)?;
                writeln!(output, "\n🔄 New game started!\n")?;
            }
            _ => {
                enter_word(&mut game, vocabulary, &line);
                save_game(store, &game)?;
            }
        }
    }
}

/// Type `word` and submit it; a rejected word is erased again
///
/// Only submitted when every letter of the line reached the pending row, so
/// extra letters or ones already known absent reject the whole line.
///
/// Returns whether the guess was committed.
fn enter_word(game: &mut Game, vocabulary: &Vocabulary, word: &str) -> bool {
    clear_pending(game, vocabulary);

    if word.len() != WORD_LENGTH || !word.bytes().all(|b| b.is_ascii_alphabetic()) {
        debug!(word, "not a {WORD_LENGTH}-letter word");
        return false;
    }

    for key in word.chars().filter_map(Key::letter) {
        game.apply_key(key, vocabulary);
    }

    let committed = game.pending() == word.to_ascii_uppercase()
        && !game.apply_key(Key::Submit, vocabulary).is_noop();
    if !committed {
        clear_pending(game, vocabulary);
    }
    committed
}

fn clear_pending(game: &mut Game, vocabulary: &Vocabulary) {
    while !game.apply_key(Key::Delete, vocabulary).is_noop() {}
}

fn print_game_over<O: Write>(output: &mut O, game: &Game) -> io::Result<()> {
    let banner = if game.status() == Status::Won {
        "    🎉 🎊 ✨  W O R D L E   S O L V E D !  ✨ 🎊 🎉    "
            .bright_green()
            .bold()
    } else {
        "                 💀  G A M E   O V E R  💀                 "
            .red()
            .bold()
    };

    writeln!(output, "\n{}", "═".repeat(70).bright_cyan())?;
    writeln!(output, "{banner}")?;
    writeln!(output, "{}", "═".repeat(70).bright_cyan())?;
    writeln!(output, "\n  {}", status_line(game).bright_white().bold())?;
    writeln!(output, "\n{}\n", share_grid(game))
}

/// Prompt for one trimmed line; `None` at end of input
fn prompt<I: BufRead, O: Write>(input: &mut I, output: &mut O, label: &str) -> Result<Option<String>> {
    write!(output, "{label}: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
