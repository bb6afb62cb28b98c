//! Word list loading utilities
//!
//! Parses word lists from newline-separated text, from the JSON dictionary
//! format (`{"valid": [...], "target": [...]}`), or from embedded constants.
//! Every entry must be a valid word; a single bad entry fails the whole load.

use super::VocabularyError;
use crate::core::Word;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// On-disk dictionary document
///
/// `valid` holds guess-only words; `target` holds the words the game may pick.
#[derive(Debug, Deserialize)]
pub struct Dictionary {
    #[serde(default)]
    pub valid: Vec<String>,
    pub target: Vec<String>,
}

/// Parse words from text, one per line
///
/// Blank lines and surrounding whitespace are ignored. `origin` names the
/// source in error messages.
///
/// # Errors
///
/// Returns `VocabularyError::InvalidWord` for the first line that is not a
/// valid word.
pub fn parse_word_lines(content: &str, origin: &str) -> Result<Vec<Word>, VocabularyError> {
    content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_number, line)| parse_entry(line, line_number, origin))
        .collect()
}

/// Load words from a file
///
/// # Errors
///
/// Returns an error if the file cannot be read or contains an invalid word.
///
/// # Examples
/// ```no_run
/// use wordle_engine::wordlists::loader::load_from_file;
///
/// let words = load_from_file("data/targets.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Word>, VocabularyError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| VocabularyError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let words = parse_word_lines(&content, &path.display().to_string())?;
    debug!(path = %path.display(), count = words.len(), "loaded word file");
    Ok(words)
}

/// Parse a JSON dictionary into `(guesses, targets)`
///
/// # Errors
///
/// Returns an error if the JSON is malformed or any entry is not a valid word.
pub fn parse_dictionary(json: &str) -> Result<(Vec<Word>, Vec<Word>), VocabularyError> {
    let dictionary: Dictionary = serde_json::from_str(json)?;

    let guesses = words_from_strings(&dictionary.valid, "dictionary.valid")?;
    let targets = words_from_strings(&dictionary.target, "dictionary.target")?;
    Ok((guesses, targets))
}

/// Load a JSON dictionary file into `(guesses, targets)`
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to parse.
pub fn load_dictionary<P: AsRef<Path>>(path: P) -> Result<(Vec<Word>, Vec<Word>), VocabularyError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| VocabularyError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (guesses, targets) = parse_dictionary(&json)?;
    debug!(
        path = %path.display(),
        guesses = guesses.len(),
        targets = targets.len(),
        "loaded dictionary"
    );
    Ok((guesses, targets))
}

/// Convert embedded string slice to Word vector
///
/// # Errors
///
/// Returns an error naming the first entry that is not a valid word.
///
/// # Examples
/// ```
/// use wordle_engine::wordlists::loader::words_from_slice;
/// use wordle_engine::wordlists::TARGETS;
///
/// let words = words_from_slice(TARGETS).unwrap();
/// assert_eq!(words.len(), TARGETS.len());
/// ```
pub fn words_from_slice(slice: &[&str]) -> Result<Vec<Word>, VocabularyError> {
    slice
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(entry, index + 1, "embedded"))
        .collect()
}

fn words_from_strings(entries: &[String], origin: &str) -> Result<Vec<Word>, VocabularyError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(entry, index + 1, origin))
        .collect()
}

fn parse_entry(entry: &str, position: usize, origin: &str) -> Result<Word, VocabularyError> {
    Word::new(entry).map_err(|source| VocabularyError::InvalidWord {
        origin: origin.to_string(),
        position,
        entry: entry.to_string(),
        source,
    })
}
