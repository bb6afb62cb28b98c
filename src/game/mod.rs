//! Game engine
//!
//! A [`Game`] owns one game's state: the secret target, the committed
//! guesses with their evaluations, the guess being typed, the keyboard
//! knowledge and the win/loss status. It is mutated one [`Key`] at a time
//! and reports which grid cells and keyboard keys changed so a caller can
//! redraw only those.
//!
//! Between key events a caller stores the game as a blob
//! ([`Game::to_blob`]) and restores it with [`Game::restore`].

mod key;
mod record;

pub use key::{Key, KeyError, keyboard_layout};
pub use record::{GameRecord, RECORD_VERSION, RestoreError};

use crate::core::{
    ALPHABET_SIZE, Evaluation, MAX_TRIES, WORD_LENGTH, Word, evaluate, letter_index,
};
use crate::wordlists::Vocabulary;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Progress of a game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Playing,
    Won,
    Lost,
}

impl Status {
    /// Whether the game has ended
    #[inline]
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Content of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub letter: Option<char>,
    pub evaluation: Evaluation,
}

impl Cell {
    const EMPTY: Self = Self {
        letter: None,
        evaluation: Evaluation::Empty,
    };
}

/// What changed after a key press
///
/// Both lists empty means the key was ignored and the game is unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyOutcome {
    /// Grid cell indices to redraw
    pub cells: Vec<usize>,
    /// Keyboard letters to redraw
    pub keys: Vec<char>,
}

impl KeyOutcome {
    /// Whether the key press changed nothing
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.cells.is_empty() && self.keys.is_empty()
    }

    fn cells(cells: impl IntoIterator<Item = usize>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            keys: Vec::new(),
        }
    }
}

/// A broken structural rule of [`Game`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("{} guesses exceed the limit of {}", .0, MAX_TRIES)]
    TooManyGuesses(usize),
    #[error("{} pending letters exceed the word length", .0)]
    PendingTooLong(usize),
    #[error("{} pending letters left after the game ended", .0)]
    PendingAfterGameOver(usize),
    #[error("row {} holds an unscored evaluation", .0)]
    UnscoredRow(usize),
    #[error("status is {stored:?} but the guesses imply {expected:?}")]
    StatusMismatch { stored: Status, expected: Status },
}

/// One game of Wordle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    target: Word,
    guesses: Vec<Word>,
    evaluations: Vec<[Evaluation; WORD_LENGTH]>,
    pending: Vec<u8>,
    keyboard: [Evaluation; ALPHABET_SIZE],
    status: Status,
}

impl Game {
    /// Start a game against a random target from `vocabulary`
    pub fn new<R: Rng + ?Sized>(vocabulary: &Vocabulary, rng: &mut R) -> Self {
        let game = Self::with_target(vocabulary.pick_random_target(rng));
        debug!("new game started");
        game
    }

    /// Start a game against a chosen target
    #[must_use]
    pub fn with_target(target: Word) -> Self {
        Self {
            target,
            guesses: Vec::with_capacity(MAX_TRIES),
            evaluations: Vec::with_capacity(MAX_TRIES),
            pending: Vec::with_capacity(WORD_LENGTH),
            keyboard: [Evaluation::Unknown; ALPHABET_SIZE],
            status: Status::Playing,
        }
    }

    /// Restore a stored game, or start a new one
    ///
    /// A missing blob, or one that fails [`Game::from_blob`], silently starts
    /// a fresh game; the rejection is only logged.
    pub fn restore<R: Rng + ?Sized>(
        blob: Option<&str>,
        vocabulary: &Vocabulary,
        rng: &mut R,
    ) -> Self {
        match blob.map(|blob| Self::from_blob(blob, vocabulary)) {
            Some(Ok(game)) => game,
            Some(Err(error)) => {
                warn!(%error, "discarding saved game");
                Self::new(vocabulary, rng)
            }
            None => Self::new(vocabulary, rng),
        }
    }

    /// Apply one key press
    ///
    /// Invalid presses (short or unknown guess, full row, empty row, a letter
    /// already known to be absent, any key after the game ended) are ignored
    /// and return an empty outcome.
    pub fn apply_key(&mut self, key: Key, vocabulary: &Vocabulary) -> KeyOutcome {
        let outcome = match key {
            Key::Submit => self.submit(vocabulary),
            Key::Delete => self.delete(),
            Key::Letter(letter) => self.type_letter(letter),
        };
        trace!(%key, ?outcome, "key applied");
        outcome
    }

    fn type_letter(&mut self, letter: u8) -> KeyOutcome {
        let Some(index) = letter_index(letter) else {
            return KeyOutcome::default();
        };

        if self.status.is_over()
            || self.pending.len() >= WORD_LENGTH
            || self.keyboard[index] == Evaluation::Absent
        {
            return KeyOutcome::default();
        }

        self.pending.push(letter);
        KeyOutcome::cells([self.row_start() + self.pending.len() - 1])
    }

    fn delete(&mut self) -> KeyOutcome {
        if self.status.is_over() || self.pending.pop().is_none() {
            return KeyOutcome::default();
        }
        KeyOutcome::cells([self.row_start() + self.pending.len()])
    }

    fn submit(&mut self, vocabulary: &Vocabulary) -> KeyOutcome {
        if self.status.is_over() {
            return KeyOutcome::default();
        }

        let Ok(pending) = <[u8; WORD_LENGTH]>::try_from(self.pending.as_slice()) else {
            return KeyOutcome::default();
        };
        let Ok(word) = Word::from_bytes(pending) else {
            return KeyOutcome::default();
        };
        if !vocabulary.contains(&word) {
            trace!(%word, "guess not in vocabulary");
            return KeyOutcome::default();
        }

        self.commit(word);

        let start = self.row_start() - WORD_LENGTH;
        KeyOutcome {
            cells: (start..start + WORD_LENGTH).collect(),
            keys: word.distinct_letters().into_iter().map(char::from).collect(),
        }
    }

    /// Score `word`, record it, update the keyboard and status
    ///
    /// Does not check the vocabulary; callers do.
    fn commit(&mut self, word: Word) {
        let evaluations = evaluate(&word, &self.target);

        for (&letter, &evaluation) in word.as_bytes().iter().zip(&evaluations) {
            if let Some(index) = letter_index(letter) {
                let known = &mut self.keyboard[index];
                if *known != Evaluation::Correct {
                    *known = evaluation;
                }
            }
        }

        self.guesses.push(word);
        self.evaluations.push(evaluations);
        self.pending.clear();
        self.status = self.expected_status();

        debug!(
            guess = %word,
            status = ?self.status,
            tries = self.guesses.len(),
            "guess committed"
        );
    }

    fn expected_status(&self) -> Status {
        if self.guesses.last() == Some(&self.target) {
            Status::Won
        } else if self.guesses.len() >= MAX_TRIES {
            Status::Lost
        } else {
            Status::Playing
        }
    }

    fn row_start(&self) -> usize {
        self.guesses.len() * WORD_LENGTH
    }

    /// Content of grid cell `index`
    ///
    /// Cells of committed guesses carry their evaluation, cells of the
    /// pending guess are `Unknown`, and everything after is `Empty`.
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Cell {
        let (row, column) = (index / WORD_LENGTH, index % WORD_LENGTH);

        if let (Some(word), Some(evaluations)) = (self.guesses.get(row), self.evaluations.get(row)) {
            return Cell {
                letter: Some(char::from(word.char_at(column))),
                evaluation: evaluations[column],
            };
        }

        match index
            .checked_sub(self.row_start())
            .and_then(|offset| self.pending.get(offset))
        {
            Some(&letter) => Cell {
                letter: Some(char::from(letter)),
                evaluation: Evaluation::Unknown,
            },
            None => Cell::EMPTY,
        }
    }

    /// Best known evaluation of a keyboard letter (case-insensitive)
    ///
    /// Anything that is not an ASCII letter is `Unknown`.
    #[must_use]
    pub fn keyboard_state(&self, letter: char) -> Evaluation {
        u8::try_from(letter.to_ascii_uppercase())
            .ok()
            .and_then(letter_index)
            .map_or(Evaluation::Unknown, |index| self.keyboard[index])
    }

    /// Evaluation to show on an on-screen key
    #[must_use]
    pub fn key_state(&self, key: Key) -> Evaluation {
        match key {
            Key::Letter(letter) => self.keyboard_state(char::from(letter)),
            Key::Submit | Key::Delete => Evaluation::Unknown,
        }
    }

    /// Current status
    #[inline]
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Committed guesses with their evaluations, oldest first
    pub fn rows(&self) -> impl Iterator<Item = (Word, [Evaluation; WORD_LENGTH])> + '_ {
        self.guesses.iter().copied().zip(self.evaluations.iter().copied())
    }

    /// Letters typed for the next guess
    #[must_use]
    pub fn pending(&self) -> String {
        self.pending.iter().copied().map(char::from).collect()
    }

    /// Number of committed guesses
    #[inline]
    #[must_use]
    pub fn tries_used(&self) -> usize {
        self.guesses.len()
    }

    /// The target, once the game is over
    #[must_use]
    pub fn reveal(&self) -> Option<Word> {
        self.status.is_over().then_some(self.target)
    }

    /// Verify the structural rules of the game state
    ///
    /// # Errors
    ///
    /// Returns the first broken rule.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.guesses.len() > MAX_TRIES {
            return Err(InvariantError::TooManyGuesses(self.guesses.len()));
        }
        if self.pending.len() > WORD_LENGTH {
            return Err(InvariantError::PendingTooLong(self.pending.len()));
        }
        if self.status.is_over() && !self.pending.is_empty() {
            return Err(InvariantError::PendingAfterGameOver(self.pending.len()));
        }
        if let Some(row) = self
            .evaluations
            .iter()
            .position(|row| !row.iter().all(|evaluation| evaluation.is_scored()))
        {
            return Err(InvariantError::UnscoredRow(row));
        }

        let expected = self.expected_status();
        let won_early = self
            .guesses
            .split_last()
            .is_some_and(|(_, earlier)| earlier.contains(&self.target));
        if self.status != expected || won_early {
            return Err(InvariantError::StatusMismatch {
                stored: self.status,
                expected,
            });
        }

        Ok(())
    }
}
