//! Per-letter feedback for guesses and keyboard keys
//!
//! Each evaluation has a single-character code used by the serialized game
//! state:
//! - `c` = Correct (right letter, right position)
//! - `p` = Present (letter in the word, wrong position)
//! - `a` = Absent (letter not in the word)
//! - `_` = Unknown (typed but not yet scored, or key never used)
//! - `x` = Empty (nothing typed in this cell)

use super::{WORD_LENGTH, Word};

/// Feedback for a single grid cell or keyboard key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Evaluation {
    Correct,
    Present,
    Absent,
    #[default]
    Unknown,
    Empty,
}

impl Evaluation {
    /// Single-character code used in serialized state
    #[inline]
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Correct => 'c',
            Self::Present => 'p',
            Self::Absent => 'a',
            Self::Unknown => '_',
            Self::Empty => 'x',
        }
    }

    /// Parse a serialized code
    #[inline]
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'c' => Some(Self::Correct),
            'p' => Some(Self::Present),
            'a' => Some(Self::Absent),
            '_' => Some(Self::Unknown),
            'x' => Some(Self::Empty),
            _ => None,
        }
    }

    /// Whether this is the result of scoring a submitted guess
    #[inline]
    #[must_use]
    pub const fn is_scored(self) -> bool {
        match self {
            Self::Correct | Self::Present | Self::Absent => true,
            Self::Unknown | Self::Empty => false,
        }
    }
}

/// Score `guess` against `target`
///
/// A letter is `Correct` when it matches the target at the same position,
/// otherwise `Present` when it appears anywhere in the target, otherwise
/// `Absent`.
///
/// This is a plain membership test, not the "limited credit" rule where only
/// as many copies score `Present` as remain unmatched in the target. A guess
/// that repeats a letter the target holds once can score `Present` on every
/// copy.
///
/// # Examples
/// ```
/// use wordle_engine::core::{Evaluation::*, Word, evaluate};
///
/// let target = Word::new("apple").unwrap();
/// let guess = Word::new("llama").unwrap();
///
/// assert_eq!(
///     evaluate(&guess, &target),
///     [Present, Present, Present, Absent, Present]
/// );
/// ```
#[must_use]
pub fn evaluate(guess: &Word, target: &Word) -> [Evaluation; WORD_LENGTH] {
    let mut result = [Evaluation::Absent; WORD_LENGTH];

    for (i, (&letter, slot)) in guess.as_bytes().iter().zip(&mut result).enumerate() {
        *slot = if letter == target.char_at(i) {
            Evaluation::Correct
        } else if target.has_letter(letter) {
            Evaluation::Present
        } else {
            Evaluation::Absent
        };
    }

    result
}

#[cfg(test)]
mod tests {
    use super::Evaluation::{Absent, Correct, Empty, Present, Unknown};
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn codes_round_trip() {
        for eval in [Correct, Present, Absent, Unknown, Empty] {
            assert_eq!(Evaluation::from_code(eval.code()), Some(eval));
        }
        assert_eq!(Evaluation::from_code('g'), None);
    }

    #[test]
    fn default_is_unknown() {
        assert_eq!(Evaluation::default(), Unknown);
    }

    #[test]
    fn only_submitted_evaluations_are_scored() {
        assert!(Correct.is_scored());
        assert!(Present.is_scored());
        assert!(Absent.is_scored());
        assert!(!Unknown.is_scored());
        assert!(!Empty.is_scored());
    }

    #[test]
    fn exact_match_is_all_correct() {
        assert_eq!(evaluate(&word("crane"), &word("crane")), [Correct; WORD_LENGTH]);
    }

    #[test]
    fn no_shared_letters_is_all_absent() {
        assert_eq!(evaluate(&word("bumpy"), &word("crane")), [Absent; WORD_LENGTH]);
    }

    #[test]
    fn crate_against_crane() {
        assert_eq!(
            evaluate(&word("crate"), &word("crane")),
            [Correct, Correct, Correct, Absent, Correct]
        );
    }

    #[test]
    fn repeated_letter_scores_present_on_every_copy() {
        // APPLE holds one L and one A, yet both copies of each score Present
        assert_eq!(
            evaluate(&word("llama"), &word("apple")),
            [Present, Present, Present, Absent, Present]
        );
    }

    #[test]
    fn repeated_letter_beside_exact_match_still_present() {
        // SPEED vs ERASE: no position lines up, every shared letter is Present
        assert_eq!(
            evaluate(&word("speed"), &word("erase")),
            [Present, Absent, Present, Present, Absent]
        );
        // ROBOT vs FLOOR: second O is exact, first O is still Present
        assert_eq!(
            evaluate(&word("robot"), &word("floor")),
            [Present, Present, Absent, Correct, Absent]
        );
    }
}
