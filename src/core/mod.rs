//! Core domain types for Wordle
//!
//! This module contains the fundamental domain types with no knowledge of
//! game flow, storage, or rendering. Everything here is pure and `Copy`.

mod evaluation;
mod word;

pub use evaluation::{Evaluation, evaluate};
pub use word::{Word, WordError};

/// Letters per word
pub const WORD_LENGTH: usize = 5;

/// Guesses allowed per game
pub const MAX_TRIES: usize = 6;

/// Letters on the keyboard (`A`-`Z`)
pub const ALPHABET_SIZE: usize = 26;

/// Cells in the full guess grid
pub const GRID_SIZE: usize = MAX_TRIES * WORD_LENGTH;

/// Position of an uppercase ASCII letter in the alphabet
#[inline]
#[must_use]
pub const fn letter_index(letter: u8) -> Option<usize> {
    if letter.is_ascii_uppercase() {
        Some((letter - b'A') as usize)
    } else {
        None
    }
}

/// Iterate the alphabet in keyboard-table order
pub fn alphabet() -> impl Iterator<Item = u8> {
    b'A'..=b'Z'
}
