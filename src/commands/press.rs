//! Scripted key presses against the stored game
//!
//! Each key is applied to the game in the store and reported as one JSON
//! object so that other programs can redraw only what changed.

use super::session::{GameStore, load_game, save_game};
use crate::game::{Key, KeyOutcome, Status};
use crate::wordlists::Vocabulary;
use anyhow::Result;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// What one key press did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyReport {
    /// Key as given on the command line
    pub key: String,
    #[serde(flatten)]
    pub outcome: KeyOutcome,
    /// Game status after the key
    pub status: Status,
}

/// Apply `keys` in order, saving after every one
///
/// Unrecognized key names are reported with an empty delta and leave the game
/// untouched.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn run_press<S, R>(
    store: &mut S,
    vocabulary: &Vocabulary,
    keys: &[String],
    rng: &mut R,
) -> Result<Vec<KeyReport>>
where
    S: GameStore + ?Sized,
    R: Rng + ?Sized,
{
    let mut game = load_game(store, vocabulary, rng)?;
    let mut reports = Vec::with_capacity(keys.len());

    for name in keys {
        let outcome = match name.parse::<Key>() {
            Ok(key) => game.apply_key(key, vocabulary),
            Err(e) => {
                debug!(error = %e, "ignoring key");
                KeyOutcome::default()
            }
        };
        save_game(store, &game)?;

        reports.push(KeyReport {
            key: name.clone(),
            outcome,
            status: game.status(),
        });
    }

    Ok(reports)
}
