//! Wordle - CLI
//!
//! Play Wordle in a full-screen terminal UI or line by line, drive the
//! engine one key at a time from scripts, or run self-play simulations.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use wordle_engine::{
    commands::{
        FileStore, SimulationConfig, load_game, run_press, run_simple, run_simulation, save_game,
        start_new_game,
    },
    interactive::{App, run_tui},
    logging::{self, LogOptions},
    output::{print_board, print_simulation_result},
    wordlists::Vocabulary,
};

#[derive(Parser)]
#[command(
    name = "wordle_engine",
    about = "Wordle in the terminal, with a scriptable key-by-key engine",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON dictionary {"valid": [...], "target": [...]} (default: built-in word lists)
    #[arg(short, long, global = true, env = "WORDLE_DICTIONARY")]
    dictionary: Option<PathBuf>,

    /// Newline-separated guess-only words, used together with --target-list;
    /// takes precedence over --dictionary
    #[arg(long, global = true, requires = "target_list")]
    guess_list: Option<PathBuf>,

    /// Newline-separated target words, used together with --guess-list
    #[arg(long, global = true, requires = "guess_list")]
    target_list: Option<PathBuf>,

    /// File that keeps the current game between runs
    #[arg(
        short,
        long,
        global = true,
        env = "WORDLE_STATE",
        default_value = "wordle_state.json"
    )]
    state: PathBuf,

    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple line-based mode without TUI
    Simple,

    /// Discard the saved game and start a new one
    New,

    /// Print the saved game
    Show,

    /// Press keys on the saved game, printing one JSON line per key
    Press {
        /// Keys: letters, ENTER (or GO), DEL
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Play random games in parallel and report the results
    Simulate {
        /// Number of games
        #[arg(short = 'n', long, default_value = "1000")]
        games: usize,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    logging::init(LogOptions {
        verbosity: cli.verbose,
        file: cli.log_file.as_deref(),
        quiet: matches!(command, Commands::Play),
    })?;

    let vocabulary = load_vocabulary(
        cli.dictionary.as_deref(),
        cli.guess_list.as_deref().zip(cli.target_list.as_deref()),
    )?;
    let mut store = FileStore::new(cli.state);
    tracing::debug!(state = %store.path().display(), "using state file");

    match command {
        Commands::Play => run_tui(App::new(&vocabulary, store)?),
        Commands::Simple => run_simple(&mut store, &vocabulary),
        Commands::New => {
            let game = start_new_game(&mut store, &vocabulary, &mut rand::rng())?;
            print_board(&game);
            Ok(())
        }
        Commands::Show => {
            let game = load_game(&store, &vocabulary, &mut rand::rng())?;
            // Persist the fresh game if the stored one was missing or unusable
            save_game(&mut store, &game)?;
            print_board(&game);
            Ok(())
        }
        Commands::Press { keys } => {
            for report in run_press(&mut store, &vocabulary, &keys, &mut rand::rng())? {
                println!("{}", serde_json::to_string(&report)?);
            }
            Ok(())
        }
        Commands::Simulate { games, seed } => {
            let config = SimulationConfig {
                games,
                seed,
                ..SimulationConfig::default()
            };
            println!("Simulating {games} games...");
            let result = run_simulation(&vocabulary, config)?;
            print_simulation_result(&result);
            Ok(())
        }
    }
}

/// Load the vocabulary from the chosen source
///
/// Word lists win over a dictionary, which may only come from
/// `WORDLE_DICTIONARY`. Without a vocabulary no game can be created, so
/// failure here is fatal.
fn load_vocabulary(
    dictionary: Option<&Path>,
    word_lists: Option<(&Path, &Path)>,
) -> Result<Vocabulary> {
    match (word_lists, dictionary) {
        (Some((guesses, targets)), _) => Vocabulary::from_word_files(guesses, targets)
            .context("failed to load word lists"),
        (None, Some(path)) => Vocabulary::from_dictionary_file(path)
            .with_context(|| format!("failed to load dictionary {}", path.display())),
        (None, None) => Vocabulary::embedded().context("built-in word lists are corrupt"),
    }
}
