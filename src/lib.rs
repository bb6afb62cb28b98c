//! Wordle Engine
//!
//! The rules of Wordle as a small state machine: a game is fed one key at a
//! time and reports which grid cells and keyboard keys changed. Games
//! serialize to a versioned JSON blob between key presses.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wordle_engine::core::Word;
//! use wordle_engine::game::{Game, Key, Status};
//! use wordle_engine::wordlists::Vocabulary;
//!
//! let vocabulary = Vocabulary::embedded().unwrap();
//! let mut game = Game::with_target(Word::new("crane").unwrap());
//!
//! for c in "CRANE".chars() {
//!     game.apply_key(Key::letter(c).unwrap(), &vocabulary);
//! }
//! let outcome = game.apply_key(Key::Submit, &vocabulary);
//!
//! assert_eq!(outcome.cells, vec![0, 1, 2, 3, 4]);
//! assert_eq!(game.status(), Status::Won);
//!
//! let blob = game.to_blob();
//! let restored = Game::from_blob(&blob, &vocabulary).unwrap();
//! assert_eq!(restored, game);
//! ```

// Core domain types
pub mod core;

// Game engine and its serialized form
pub mod game;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

// Log subscriber setup
pub mod logging;
