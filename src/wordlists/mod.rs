//! Word lists and the vocabulary store
//!
//! Provides embedded word lists compiled into the binary and the
//! [`Vocabulary`] built from them (or from files) once at startup.

mod embedded;
pub mod loader;

pub use embedded::{GUESSES, GUESSES_COUNT, TARGETS, TARGETS_COUNT};

use crate::core::{Word, WordError};
use rand::Rng;
use rustc_hash::FxHashSet;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors raised while building a vocabulary
///
/// Any of these at startup means no game can be created.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read word list {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed dictionary")]
    Json(#[from] serde_json::Error),
    #[error("{origin}: invalid word '{entry}' at entry {position}")]
    InvalidWord {
        origin: String,
        position: usize,
        entry: String,
        #[source]
        source: WordError,
    },
    #[error("vocabulary has no target words")]
    NoTargets,
}

/// Immutable set of acceptable guesses plus the ordered target list
///
/// Targets are always acceptable guesses. Built once and shared by reference;
/// every method is read-only.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    acceptable: FxHashSet<Word>,
    acceptable_sorted: Vec<Word>,
    targets: Vec<Word>,
    target_set: FxHashSet<Word>,
}

impl Vocabulary {
    /// Build a vocabulary from guess-only words and target words
    ///
    /// # Errors
    ///
    /// Returns `VocabularyError::NoTargets` if `targets` is empty.
    pub fn new(guesses: Vec<Word>, targets: Vec<Word>) -> Result<Self, VocabularyError> {
        if targets.is_empty() {
            return Err(VocabularyError::NoTargets);
        }

        let target_set: FxHashSet<Word> = targets.iter().copied().collect();
        let acceptable: FxHashSet<Word> = guesses.into_iter().chain(targets.iter().copied()).collect();

        let mut acceptable_sorted: Vec<Word> = acceptable.iter().copied().collect();
        acceptable_sorted.sort_unstable();

        info!(
            acceptable = acceptable.len(),
            targets = targets.len(),
            "vocabulary loaded"
        );

        Ok(Self {
            acceptable,
            acceptable_sorted,
            targets,
            target_set,
        })
    }

    /// Vocabulary from the word lists compiled into the binary
    ///
    /// # Errors
    ///
    /// Fails only if the embedded lists are corrupt, which `build.rs` already
    /// guards against.
    pub fn embedded() -> Result<Self, VocabularyError> {
        Self::new(
            loader::words_from_slice(GUESSES)?,
            loader::words_from_slice(TARGETS)?,
        )
    }

    /// Vocabulary from a JSON dictionary file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable, malformed, or has no targets.
    pub fn from_dictionary_file<P: AsRef<Path>>(path: P) -> Result<Self, VocabularyError> {
        let (guesses, targets) = loader::load_dictionary(path)?;
        Self::new(guesses, targets)
    }

    /// Vocabulary from two newline-separated word files
    ///
    /// # Errors
    ///
    /// Returns an error if either file is unreadable or invalid, or if the
    /// target file is empty.
    pub fn from_word_files<P: AsRef<Path>, Q: AsRef<Path>>(
        guesses_path: P,
        targets_path: Q,
    ) -> Result<Self, VocabularyError> {
        Self::new(
            loader::load_from_file(guesses_path)?,
            loader::load_from_file(targets_path)?,
        )
    }

    /// Whether `word` may be submitted as a guess (case-insensitive)
    #[must_use]
    pub fn is_acceptable_guess(&self, word: &str) -> bool {
        Word::new(word).is_ok_and(|word| self.contains(&word))
    }

    /// Whether `word` may be submitted as a guess
    #[inline]
    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.acceptable.contains(word)
    }

    /// Whether `word` could have been picked as a target
    #[inline]
    #[must_use]
    pub fn is_target(&self, word: &Word) -> bool {
        self.target_set.contains(word)
    }

    /// Draw a target uniformly at random
    pub fn pick_random_target<R: Rng + ?Sized>(&self, rng: &mut R) -> Word {
        // Non-empty by construction
        self.targets[rng.random_range(0..self.targets.len())]
    }

    /// Target words in load order
    #[must_use]
    pub fn targets(&self) -> &[Word] {
        &self.targets
    }

    /// Every acceptable guess, sorted
    #[must_use]
    pub fn acceptable_words(&self) -> &[Word] {
        &self.acceptable_sorted
    }

    /// Number of acceptable guesses
    #[must_use]
    pub fn acceptable_count(&self) -> usize {
        self.acceptable.len()
    }
}
