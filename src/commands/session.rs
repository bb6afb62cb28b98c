//! Game persistence between runs
//!
//! The engine only produces and consumes blobs; a [`GameStore`] decides where
//! they live.

use crate::game::Game;
use crate::wordlists::Vocabulary;
use anyhow::{Context, Result};
use rand::Rng;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Somewhere a serialized game can be kept
pub trait GameStore {
    /// Stored blob, or `None` if nothing was saved yet
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored blob
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save(&mut self, blob: &str) -> Result<()>;

    /// Forget the stored blob
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be cleared.
    fn clear(&mut self) -> Result<()>;
}

/// Blob kept in a file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GameStore for FileStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("failed to read state file {}", self.path.display())),
        }
    }

    fn save(&mut self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        fs::write(&self.path, blob)
            .with_context(|| format!("failed to write state file {}", self.path.display()))
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e)
                .with_context(|| format!("failed to remove state file {}", self.path.display())),
            _ => Ok(()),
        }
    }
}

/// Blob kept in memory, used by the simulator and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, blob: &str) -> Result<()> {
        self.blob = Some(blob.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.blob = None;
        Ok(())
    }
}

/// Restore the stored game, starting a fresh one if there is none or it is unusable
///
/// # Errors
///
/// Returns an error only if the store itself cannot be read.
pub fn load_game<S, R>(store: &S, vocabulary: &Vocabulary, rng: &mut R) -> Result<Game>
where
    S: GameStore + ?Sized,
    R: Rng + ?Sized,
{
    let blob = store.load()?;
    debug!(found = blob.is_some(), "loading stored game");
    Ok(Game::restore(blob.as_deref(), vocabulary, rng))
}

/// Serialize `game` into the store
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn save_game<S: GameStore + ?Sized>(store: &mut S, game: &Game) -> Result<()> {
    store.save(&game.to_blob())
}

/// Throw away whatever is stored and save a fresh game
///
/// # Errors
///
/// Returns an error if the store cannot be cleared or written.
pub fn start_new_game<S, R>(store: &mut S, vocabulary: &Vocabulary, rng: &mut R) -> Result<Game>
where
    S: GameStore + ?Sized,
    R: Rng + ?Sized,
{
    store.clear()?;
    let game = Game::new(vocabulary, rng);
    save_game(store, &game)?;
    debug!("new game stored");
    Ok(game)
}
