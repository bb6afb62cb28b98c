//! Serialized game state
//!
//! A game travels between key events as a small versioned JSON object:
//!
//! ```json
//! {"version":1,"target":"CRANE","letters":"CRATE","evaluations":"cccac",
//!  "pending":"SL","keyboard":"c_c_c____________c_a______","status":"playing"}
//! ```
//!
//! `letters` and `evaluations` hold every committed guess back to back,
//! `keyboard` holds one evaluation code per letter `A`-`Z`.
//!
//! Blobs may come from untrusted storage, so restoring replays the committed
//! guesses against the target and rejects anything the engine could not have
//! produced itself.

use super::{Game, InvariantError, Key, Status};
use crate::core::{ALPHABET_SIZE, Evaluation, WORD_LENGTH, Word, WordError};
use crate::wordlists::Vocabulary;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current encoding version
pub const RECORD_VERSION: u32 = 1;

/// Wire form of a [`Game`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub version: u32,
    pub target: String,
    pub letters: String,
    pub evaluations: String,
    pub pending: String,
    pub keyboard: String,
    pub status: Status,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Why a stored game was rejected
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("saved game is not valid JSON")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported saved game version {} (expected {})", .found, RECORD_VERSION)]
    UnsupportedVersion { found: u32 },
    #[error("invalid target")]
    InvalidTarget(#[source] WordError),
    #[error("'{0}' is not a possible target")]
    UnknownTarget(Word),
    #[error("{letters} guessed letters but {evaluations} evaluations")]
    LengthMismatch { letters: usize, evaluations: usize },
    #[error("{} guessed letters do not form whole words", .0)]
    PartialGuess(usize),
    #[error("invalid guess in row {row}")]
    InvalidGuess {
        row: usize,
        #[source]
        source: WordError,
    },
    #[error("'{0}' is not an acceptable guess")]
    UnacceptableGuess(Word),
    #[error("unknown evaluation code '{0}'")]
    UnknownCode(char),
    #[error("keyboard has {} entries, expected {}", .0, ALPHABET_SIZE)]
    KeyboardSize(usize),
    #[error("invalid pending letter '{0}'")]
    InvalidPendingLetter(char),
    #[error("saved {field} do not match the replayed game")]
    Mismatch { field: &'static str },
    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

impl Game {
    /// Snapshot the game in wire form
    #[must_use]
    pub fn to_record(&self) -> GameRecord {
        GameRecord {
            version: RECORD_VERSION,
            target: self.target.to_string(),
            letters: self.guesses.iter().map(ToString::to_string).collect(),
            evaluations: encode(self.evaluations.iter().flatten()),
            pending: self.pending(),
            keyboard: encode(&self.keyboard),
            status: self.status,
        }
    }

    /// Serialize the game
    ///
    /// # Panics
    /// Will not panic - the record holds only strings, an integer and a
    /// unit enum, all of which serialize to JSON infallibly.
    #[must_use]
    pub fn to_blob(&self) -> String {
        serde_json::to_string(&self.to_record()).expect("game record serializes to JSON")
    }

    /// Parse and validate a serialized game
    ///
    /// # Errors
    ///
    /// Returns `RestoreError` if the blob is not JSON, has another version,
    /// or describes a state this engine could not have reached with
    /// `vocabulary`.
    pub fn from_blob(blob: &str, vocabulary: &Vocabulary) -> Result<Self, RestoreError> {
        let probe: VersionProbe = serde_json::from_str(blob)?;
        if probe.version != RECORD_VERSION {
            return Err(RestoreError::UnsupportedVersion {
                found: probe.version,
            });
        }

        let record: GameRecord = serde_json::from_str(blob)?;
        Self::from_record(&record, vocabulary)
    }

    /// Rebuild a game from its wire form
    ///
    /// The committed guesses are replayed from scratch; the stored
    /// evaluations, keyboard, status and pending letters must match the
    /// replay exactly.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn from_record(record: &GameRecord, vocabulary: &Vocabulary) -> Result<Self, RestoreError> {
        if record.version != RECORD_VERSION {
            return Err(RestoreError::UnsupportedVersion {
                found: record.version,
            });
        }

        let target = Word::new(&record.target).map_err(RestoreError::InvalidTarget)?;
        if !vocabulary.is_target(&target) || record.target != target.to_string() {
            return Err(RestoreError::UnknownTarget(target));
        }

        let evaluations = decode(&record.evaluations)?;
        let keyboard = decode(&record.keyboard)?;
        let letters = record.letters.as_bytes();

        if letters.len() != evaluations.len() {
            return Err(RestoreError::LengthMismatch {
                letters: letters.len(),
                evaluations: evaluations.len(),
            });
        }
        if letters.len() % WORD_LENGTH != 0 {
            return Err(RestoreError::PartialGuess(letters.len()));
        }
        if keyboard.len() != ALPHABET_SIZE {
            return Err(RestoreError::KeyboardSize(keyboard.len()));
        }

        let mut game = Self::with_target(target);
        for (row, chunk) in letters.chunks_exact(WORD_LENGTH).enumerate() {
            let word = parse_guess(chunk, row)?;
            if !vocabulary.contains(&word) {
                return Err(RestoreError::UnacceptableGuess(word));
            }
            if game.status.is_over() {
                return Err(RestoreError::Mismatch { field: "guesses" });
            }
            game.commit(word);
        }

        if game.evaluations.iter().flatten().ne(evaluations.iter()) {
            return Err(RestoreError::Mismatch {
                field: "evaluations",
            });
        }
        if game.keyboard[..] != keyboard[..] {
            return Err(RestoreError::Mismatch { field: "keyboard" });
        }
        if game.status != record.status {
            return Err(RestoreError::Mismatch { field: "status" });
        }

        for c in record.pending.chars() {
            if !c.is_ascii_uppercase() {
                return Err(RestoreError::InvalidPendingLetter(c));
            }
            // Re-typing rejects overflow, absent letters and typing after the end
            if game.apply_key(Key::Letter(c as u8), vocabulary).is_noop() {
                return Err(RestoreError::Mismatch { field: "pending" });
            }
        }

        game.check_invariants()?;
        Ok(game)
    }
}

fn encode<'a>(evaluations: impl IntoIterator<Item = &'a Evaluation>) -> String {
    evaluations.into_iter().map(|evaluation| evaluation.code()).collect()
}

fn decode(codes: &str) -> Result<Vec<Evaluation>, RestoreError> {
    codes
        .chars()
        .map(|code| Evaluation::from_code(code).ok_or(RestoreError::UnknownCode(code)))
        .collect()
}

fn parse_guess(chunk: &[u8], row: usize) -> Result<Word, RestoreError> {
    let invalid = |source| RestoreError::InvalidGuess { row, source };

    if !chunk.iter().all(u8::is_ascii_uppercase) {
        return Err(invalid(WordError::InvalidCharacters));
    }
    let bytes: [u8; WORD_LENGTH] = chunk
        .try_into()
        .map_err(|_| invalid(WordError::InvalidLength(chunk.len())))?;
    Word::from_bytes(bytes).map_err(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::loader::words_from_slice;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn vocabulary() -> Vocabulary {
        Vocabulary::new(
            words_from_slice(&["crate", "bumpy", "llama"]).unwrap(),
            words_from_slice(&["crane", "apple"]).unwrap(),
        )
        .unwrap()
    }

    fn played(vocabulary: &Vocabulary, keys: &str) -> Game {
        let mut game = Game::with_target(Word::new("crane").unwrap());
        for name in keys.split_whitespace() {
            game.apply_key(name.parse().unwrap(), vocabulary);
        }
        game
    }

    #[test]
    fn record_layout() {
        let vocabulary = vocabulary();
        let game = played(&vocabulary, "C R A T E ENTER S L");

        let record = game.to_record();

        assert_eq!(
            record,
            GameRecord {
                version: RECORD_VERSION,
                target: "CRANE".to_string(),
                letters: "CRATE".to_string(),
                evaluations: "cccac".to_string(),
                pending: "SL".to_string(),
                keyboard: "c_c_c____________c_a______".to_string(),
                status: Status::Playing,
            }
        );
    }

    #[test]
    fn blob_round_trips() {
        let vocabulary = vocabulary();
        let game = played(&vocabulary, "B U M P Y ENTER C R A T E ENTER C R");

        let restored = Game::from_blob(&game.to_blob(), &vocabulary).unwrap();

        assert_eq!(restored, game);
    }

    #[test]
    fn finished_game_round_trips() {
        let vocabulary = vocabulary();
        let game = played(&vocabulary, "C R A N E ENTER");
        assert_eq!(game.status(), Status::Won);

        let restored = Game::from_blob(&game.to_blob(), &vocabulary).unwrap();
        assert_eq!(restored, game);
    }

    #[test]
    fn status_serializes_lowercase() {
        let vocabulary = vocabulary();
        let blob = played(&vocabulary, "C R A N E ENTER").to_blob();
        assert!(blob.contains(r#""status":"won""#), "{blob}");
    }

    #[test]
    fn garbage_is_malformed() {
        let vocabulary = vocabulary();
        assert!(matches!(
            Game::from_blob("not json", &vocabulary),
            Err(RestoreError::Malformed(_))
        ));
        assert!(matches!(
            Game::from_blob("{}", &vocabulary),
            Err(RestoreError::Malformed(_))
        ));
    }

    #[test]
    fn other_version_is_rejected() {
        let vocabulary = vocabulary();
        let blob = played(&vocabulary, "")
            .to_blob()
            .replace(r#""version":1"#, r#""version":2"#);

        assert!(matches!(
            Game::from_blob(&blob, &vocabulary),
            Err(RestoreError::UnsupportedVersion { found: 2 })
        ));
    }

    fn tampered(vocabulary: &Vocabulary, edit: impl FnOnce(&mut GameRecord)) -> RestoreError {
        let mut record = played(vocabulary, "C R A T E ENTER S").to_record();
        edit(&mut record);
        Game::from_record(&record, vocabulary).unwrap_err()
    }

    #[test]
    fn target_outside_vocabulary_is_rejected() {
        let vocabulary = vocabulary();
        let error = tampered(&vocabulary, |r| r.target = "CRATE".to_string());
        assert!(matches!(error, RestoreError::UnknownTarget(_)));

        let error = tampered(&vocabulary, |r| r.target = "crane".to_string());
        assert!(matches!(error, RestoreError::UnknownTarget(_)));

        let error = tampered(&vocabulary, |r| r.target = "CRAN".to_string());
        assert!(matches!(error, RestoreError::InvalidTarget(_)));
    }

    #[test]
    fn forged_evaluations_are_rejected() {
        let vocabulary = vocabulary();
        let error = tampered(&vocabulary, |r| r.evaluations = "ccccc".to_string());
        assert!(matches!(
            error,
            RestoreError::Mismatch {
                field: "evaluations"
            }
        ));

        let error = tampered(&vocabulary, |r| r.evaluations = "cccgc".to_string());
        assert!(matches!(error, RestoreError::UnknownCode('g')));
    }

    #[test]
    fn forged_keyboard_is_rejected() {
        let vocabulary = vocabulary();
        let error = tampered(&vocabulary, |r| r.keyboard = "_".repeat(ALPHABET_SIZE));
        assert!(matches!(error, RestoreError::Mismatch { field: "keyboard" }));

        let error = tampered(&vocabulary, |r| r.keyboard = "_".repeat(3));
        assert!(matches!(error, RestoreError::KeyboardSize(3)));
    }

    #[test]
    fn forged_status_is_rejected() {
        let vocabulary = vocabulary();
        let error = tampered(&vocabulary, |r| r.status = Status::Won);
        assert!(matches!(error, RestoreError::Mismatch { field: "status" }));
    }

    #[test]
    fn uneven_lengths_are_rejected() {
        let vocabulary = vocabulary();
        let error = tampered(&vocabulary, |r| r.evaluations.push('c'));
        assert!(matches!(
            error,
            RestoreError::LengthMismatch {
                letters: 5,
                evaluations: 6
            }
        ));

        let error = tampered(&vocabulary, |r| {
            r.letters.push('X');
            r.evaluations.push('a');
        });
        assert!(matches!(error, RestoreError::PartialGuess(6)));
    }

    #[test]
    fn unacceptable_guess_is_rejected() {
        let vocabulary = vocabulary();
        let error = tampered(&vocabulary, |r| r.letters = "CRANK".to_string());
        assert!(matches!(error, RestoreError::UnacceptableGuess(_)));

        let error = tampered(&vocabulary, |r| r.letters = "crate".to_string());
        assert!(matches!(error, RestoreError::InvalidGuess { row: 0, .. }));
    }

    #[test]
    fn impossible_pending_letters_are_rejected() {
        let vocabulary = vocabulary();

        // T is known absent after CRATE
        let error = tampered(&vocabulary, |r| r.pending = "T".to_string());
        assert!(matches!(error, RestoreError::Mismatch { field: "pending" }));

        let error = tampered(&vocabulary, |r| r.pending = "SSSSSS".to_string());
        assert!(matches!(error, RestoreError::Mismatch { field: "pending" }));

        let error = tampered(&vocabulary, |r| r.pending = "s".to_string());
        assert!(matches!(error, RestoreError::InvalidPendingLetter('s')));
    }

    #[test]
    fn restore_falls_back_to_a_fresh_game() {
        let vocabulary = vocabulary();
        let mut rng = StdRng::seed_from_u64(3);

        for blob in [None, Some(""), Some("{\"version\":"), Some(r#"{"version":9}"#)] {
            let game = Game::restore(blob, &vocabulary, &mut rng);
            assert_eq!(game.status(), Status::Playing);
            assert_eq!(game.tries_used(), 0);
            assert_eq!(game.pending(), "");
        }
    }

    #[test]
    fn restore_keeps_a_valid_game() {
        let vocabulary = vocabulary();
        let mut rng = StdRng::seed_from_u64(3);
        let game = played(&vocabulary, "C R A T E ENTER S");

        let restored = Game::restore(Some(&game.to_blob()), &vocabulary, &mut rng);
        assert_eq!(restored, game);
    }
}
