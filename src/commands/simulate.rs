//! Self-play simulation
//!
//! Plays many games with a random guesser, in parallel. Every key goes
//! through a full save/restore cycle and an invariant check, so a run doubles
//! as a soak test of the engine and its blob format.

use super::session::{GameStore, MemoryStore, save_game};
use crate::core::{Evaluation, MAX_TRIES, Word};
use crate::game::{Game, Key, KeyOutcome, Status};
use crate::wordlists::Vocabulary;
use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How a simulation is run
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub games: usize,
    /// Base seed; game `i` uses `seed + i`. Random when `None`.
    pub seed: Option<u64>,
    pub show_progress: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: 1000,
            seed: None,
            show_progress: true,
        }
    }
}

/// Result of one simulated game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub status: Status,
    pub tries: usize,
    pub keys_pressed: usize,
    pub ignored_keys: usize,
}

/// Totals over a simulation run
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub total_games: usize,
    pub won: usize,
    pub lost: usize,
    /// Wins by number of guesses, index 0 is a first-try win
    pub guess_distribution: [usize; MAX_TRIES],
    pub keys_pressed: usize,
    pub ignored_keys: usize,
    pub duration: Duration,
    pub games_per_second: f64,
}

impl SimulationResult {
    /// Mean number of guesses over won games
    #[must_use]
    pub fn average_guesses(&self) -> f64 {
        if self.won == 0 {
            return 0.0;
        }
        let total: usize = self
            .guess_distribution
            .iter()
            .enumerate()
            .map(|(i, count)| (i + 1) * count)
            .sum();
        total as f64 / self.won as f64
    }
}

/// Play `config.games` games against random targets
///
/// # Errors
///
/// Returns an error if a stored game fails to restore or the engine breaks
/// one of its invariants. Either means a bug.
pub fn run_simulation(vocabulary: &Vocabulary, config: SimulationConfig) -> Result<SimulationResult> {
    let base_seed = config.seed.unwrap_or_else(|| rand::rng().random());
    info!(games = config.games, seed = base_seed, "starting simulation");

    let pb = if config.show_progress {
        ProgressBar::new(config.games as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }

    let start = Instant::now();

    let summaries = (0..config.games)
        .into_par_iter()
        .map(|i| -> Result<GameSummary> {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
            let summary = play_one(vocabulary, &mut rng)
                .with_context(|| format!("simulated game {i} (seed {base_seed})"))?;
            pb.inc(1);
            Ok(summary)
        })
        .collect::<Result<Vec<_>>>();

    pb.finish_and_clear();
    let summaries = summaries?;
    let duration = start.elapsed();

    let mut result = SimulationResult {
        total_games: summaries.len(),
        won: 0,
        lost: 0,
        guess_distribution: [0; MAX_TRIES],
        keys_pressed: 0,
        ignored_keys: 0,
        duration,
        games_per_second: summaries.len() as f64 / duration.as_secs_f64().max(f64::EPSILON),
    };

    for summary in &summaries {
        result.keys_pressed += summary.keys_pressed;
        result.ignored_keys += summary.ignored_keys;
        match summary.status {
            Status::Won => {
                result.won += 1;
                result.guess_distribution[summary.tries - 1] += 1;
            }
            Status::Lost => result.lost += 1,
            Status::Playing => {}
        }
    }

    info!(
        won = result.won,
        lost = result.lost,
        elapsed_ms = duration.as_millis(),
        "simulation finished"
    );
    Ok(result)
}

/// Play a single game to the end with a random guesser
///
/// # Errors
///
/// Returns an error if the game fails to restore from its own blob, breaks
/// an invariant, or the guesser runs out of words.
pub fn play_one<R: Rng + ?Sized>(vocabulary: &Vocabulary, rng: &mut R) -> Result<GameSummary> {
    let mut store = MemoryStore::new();
    let mut game = Game::new(vocabulary, rng);
    save_game(&mut store, &game)?;

    let mut keys_pressed = 0;
    let mut ignored_keys = 0;

    while !game.status().is_over() {
        let guess = pick_guess(&game, vocabulary, rng)
            .ok_or_else(|| anyhow!("no acceptable guess avoids the absent letters"))?;

        for key in keys_for_guess(guess, rng) {
            let (next, outcome) = press(&mut store, vocabulary, key)?;
            game = next;
            keys_pressed += 1;
            if outcome.is_noop() {
                ignored_keys += 1;
            }
        }
    }

    debug!(status = ?game.status(), tries = game.tries_used(), "simulated game over");
    Ok(GameSummary {
        status: game.status(),
        tries: game.tries_used(),
        keys_pressed,
        ignored_keys,
    })
}

/// Random acceptable word with no letter the keyboard marks absent
fn pick_guess<R: Rng + ?Sized>(game: &Game, vocabulary: &Vocabulary, rng: &mut R) -> Option<Word> {
    let candidates: Vec<Word> = vocabulary
        .acceptable_words()
        .iter()
        .filter(|word| {
            word.as_bytes()
                .iter()
                .all(|&b| game.keyboard_state(char::from(b)) != Evaluation::Absent)
        })
        .copied()
        .collect();

    candidates.choose(rng).copied()
}

/// Keys that type and submit `guess`, sometimes with stray presses mixed in
fn keys_for_guess<R: Rng + ?Sized>(guess: Word, rng: &mut R) -> Vec<Key> {
    let mut keys = Vec::with_capacity(9);

    // Submitting an empty row is always ignored
    if rng.random_bool(0.2) {
        keys.push(Key::Submit);
    }
    if rng.random_bool(0.2) {
        keys.push(Key::Letter(b'Q'));
        keys.push(Key::Delete);
    }

    keys.extend(guess.as_bytes().iter().map(|&b| Key::Letter(b)));
    keys.push(Key::Submit);
    keys
}

/// Restore from the store, apply `key`, check, and store again
fn press(store: &mut MemoryStore, vocabulary: &Vocabulary, key: Key) -> Result<(Game, KeyOutcome)> {
    let blob = store
        .load()?
        .context("simulated game missing from the store")?;
    let mut game = Game::from_blob(&blob, vocabulary).context("stored game failed to restore")?;

    let outcome = game.apply_key(key, vocabulary);
    game.check_invariants()
        .with_context(|| format!("invariant broken after {key}"))?;

    save_game(store, &game)?;
    Ok((game, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::loader::words_from_slice;

    fn config(games: usize, seed: u64) -> SimulationConfig {
        SimulationConfig {
            games,
            seed: Some(seed),
            show_progress: false,
        }
    }

    #[test]
    fn totals_add_up() {
        let vocabulary = Vocabulary::embedded().unwrap();
        let result = run_simulation(&vocabulary, config(40, 11)).unwrap();

        assert_eq!(result.total_games, 40);
        assert_eq!(result.won + result.lost, 40);
        assert_eq!(result.guess_distribution.iter().sum::<usize>(), result.won);
        assert!(result.ignored_keys <= result.keys_pressed);
        assert!(result.keys_pressed >= 40 * 6);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let vocabulary = Vocabulary::embedded().unwrap();
        let first = run_simulation(&vocabulary, config(20, 99)).unwrap();
        let second = run_simulation(&vocabulary, config(20, 99)).unwrap();

        assert_eq!(first.won, second.won);
        assert_eq!(first.guess_distribution, second.guess_distribution);
        assert_eq!(first.keys_pressed, second.keys_pressed);
        assert_eq!(first.ignored_keys, second.ignored_keys);
    }

    #[test]
    fn single_target_is_found_once_alternatives_are_ruled_out() {
        let vocabulary = Vocabulary::new(vec![], words_from_slice(&["crane"]).unwrap()).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let summary = play_one(&vocabulary, &mut rng).unwrap();
        assert_eq!(summary.status, Status::Won);
        assert_eq!(summary.tries, 1);
    }

    #[test]
    fn guesser_avoids_absent_letters() {
        let vocabulary = Vocabulary::new(
            words_from_slice(&["fjord", "bumpy"]).unwrap(),
            words_from_slice(&["crane"]).unwrap(),
        )
        .unwrap();
        let mut game = Game::with_target(Word::new("crane").unwrap());
        for c in "BUMPY".chars() {
            game.apply_key(Key::letter(c).unwrap(), &vocabulary);
        }
        game.apply_key(Key::Submit, &vocabulary);

        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..20 {
            let guess = pick_guess(&game, &vocabulary, &mut rng).unwrap();
            assert_ne!(guess.to_string(), "BUMPY");
        }
    }

    #[test]
    fn empty_run() {
        let vocabulary = Vocabulary::embedded().unwrap();
        let result = run_simulation(&vocabulary, config(0, 1)).unwrap();

        assert_eq!(result.total_games, 0);
        assert!(result.average_guesses().abs() < f64::EPSILON);
    }

    #[test]
    fn average_guesses_over_wins() {
        let result = SimulationResult {
            total_games: 3,
            won: 2,
            lost: 1,
            guess_distribution: [0, 1, 0, 1, 0, 0],
            keys_pressed: 0,
            ignored_keys: 0,
            duration: Duration::ZERO,
            games_per_second: 0.0,
        };
        assert!((result.average_guesses() - 3.0).abs() < f64::EPSILON);
    }
}
