//! TUI application state and logic

use crate::commands::session::{GameStore, load_game, save_game, start_new_game};
use crate::core::MAX_TRIES;
use crate::game::{Game, Key, KeyOutcome, Status};
use crate::wordlists::Vocabulary;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::debug;

/// Application state
pub struct App<'a, S: GameStore> {
    pub vocabulary: &'a Vocabulary,
    pub store: S,
    pub game: Game,
    /// What the last key changed, for highlighting
    pub last_outcome: KeyOutcome,
    pub stats: Statistics,
    pub should_quit: bool,
    /// Whether the current game's result is already in `stats`
    recorded: bool,
}

/// Results of the games finished in this session
#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
    /// Wins by number of guesses, index 0 is a first-try win
    pub guess_distribution: [usize; MAX_TRIES],
}

impl Statistics {
    pub fn record(&mut self, game: &Game) {
        match game.status() {
            Status::Won => {
                self.total_games += 1;
                self.games_won += 1;
                self.guess_distribution[game.tries_used() - 1] += 1;
            }
            Status::Lost => self.total_games += 1,
            Status::Playing => {}
        }
    }

    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.games_won as f64 / self.total_games as f64 * 100.0
        }
    }
}

impl<'a, S: GameStore> App<'a, S> {
    /// Resume the stored game, or start one
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn new(vocabulary: &'a Vocabulary, store: S) -> Result<Self> {
        let game = load_game(&store, vocabulary, &mut rand::rng())?;
        // A game finished in an earlier session is not this session's result
        let recorded = game.status().is_over();

        Ok(Self {
            vocabulary,
            store,
            game,
            last_outcome: KeyOutcome::default(),
            stats: Statistics::default(),
            should_quit: false,
            recorded,
        })
    }

    /// Apply a game key and save the result
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn press(&mut self, key: Key) -> Result<()> {
        self.last_outcome = self.game.apply_key(key, self.vocabulary);
        save_game(&mut self.store, &self.game)?;

        if self.game.status().is_over() && !self.recorded {
            self.stats.record(&self.game);
            self.recorded = true;
            debug!(status = ?self.game.status(), "game finished");
        }
        Ok(())
    }

    /// Abandon the current game and start another
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared or written.
    pub fn new_game(&mut self) -> Result<()> {
        self.game = start_new_game(&mut self.store, self.vocabulary, &mut rand::rng())?;
        self.last_outcome = KeyOutcome::default();
        self.recorded = false;
        Ok(())
    }

    /// React to a terminal key event
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Only process key press events (fixes Windows double-input bug)
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('n') if ctrl => self.new_game()?,
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.press(Key::Submit)?,
            KeyCode::Backspace | KeyCode::Delete => self.press(Key::Delete)?,
            KeyCode::Char(c) if !ctrl => {
                if let Some(letter) = Key::letter(c) {
                    self.press(letter)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails, if there's an I/O error
/// during rendering or event handling, or if the store fails.
pub fn run_tui<S: GameStore>(app: App<'_, S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend, S: GameStore>(
    terminal: &mut Terminal<B>,
    mut app: App<'_, S>,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key_event(key)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::session::MemoryStore;
    use crate::wordlists::loader::words_from_slice;

    fn vocabulary() -> Vocabulary {
        Vocabulary::new(
            words_from_slice(&["crate"]).unwrap(),
            words_from_slice(&["crane"]).unwrap(),
        )
        .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_word(app: &mut App<'_, MemoryStore>, word: &str) {
        for c in word.chars() {
            app.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
        app.handle_key_event(key(KeyCode::Enter)).unwrap();
    }

    #[test]
    fn typing_updates_game_and_store() {
        let vocabulary = vocabulary();
        let mut app = App::new(&vocabulary, MemoryStore::new()).unwrap();

        app.handle_key_event(key(KeyCode::Char('c'))).unwrap();
        assert_eq!(app.game.pending(), "C");
        assert_eq!(app.last_outcome.cells, vec![0]);

        let stored = app.store.load().unwrap().unwrap();
        assert_eq!(Game::from_blob(&stored, &vocabulary).unwrap(), app.game);
    }

    #[test]
    fn backspace_deletes() {
        let vocabulary = vocabulary();
        let mut app = App::new(&vocabulary, MemoryStore::new()).unwrap();

        app.handle_key_event(key(KeyCode::Char('c'))).unwrap();
        app.handle_key_event(key(KeyCode::Backspace)).unwrap();

        assert_eq!(app.game.pending(), "");
        assert_eq!(app.last_outcome.cells, vec![0]);
    }

    #[test]
    fn win_is_counted_once() {
        let vocabulary = vocabulary();
        let mut app = App::new(&vocabulary, MemoryStore::new()).unwrap();

        type_word(&mut app, "crane");
        app.handle_key_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.game.status(), Status::Won);
        assert_eq!(app.stats.total_games, 1);
        assert_eq!(app.stats.games_won, 1);
        assert_eq!(app.stats.guess_distribution[0], 1);
        assert!(app.last_outcome.is_noop());
    }

    #[test]
    fn ctrl_n_starts_over() {
        let vocabulary = vocabulary();
        let mut app = App::new(&vocabulary, MemoryStore::new()).unwrap();

        type_word(&mut app, "crate");
        app.handle_key_event(ctrl('n')).unwrap();

        assert_eq!(app.game.tries_used(), 0);
        assert!(!app.should_quit);
    }

    #[test]
    fn quit_keys() {
        let vocabulary = vocabulary();

        let mut app = App::new(&vocabulary, MemoryStore::new()).unwrap();
        app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(app.should_quit);

        let mut app = App::new(&vocabulary, MemoryStore::new()).unwrap();
        app.handle_key_event(ctrl('c')).unwrap();
        assert!(app.should_quit);
        assert_eq!(app.game.pending(), "");
    }

    #[test]
    fn non_letters_are_ignored() {
        let vocabulary = vocabulary();
        let mut app = App::new(&vocabulary, MemoryStore::new()).unwrap();

        app.handle_key_event(key(KeyCode::Char('7'))).unwrap();
        app.handle_key_event(key(KeyCode::Tab)).unwrap();

        assert_eq!(app.game.pending(), "");
    }

    #[test]
    fn statistics_win_rate() {
        let mut stats = Statistics::default();
        assert!(stats.win_rate().abs() < f64::EPSILON);

        let mut game = Game::with_target(crate::core::Word::new("crane").unwrap());
        let vocabulary = vocabulary();
        for c in "CRANE".chars() {
            game.apply_key(Key::letter(c).unwrap(), &vocabulary);
        }
        game.apply_key(Key::Submit, &vocabulary);
        stats.record(&game);

        assert!((stats.win_rate() - 100.0).abs() < f64::EPSILON);
    }
}
