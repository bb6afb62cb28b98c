//! Command implementations

pub mod press;
pub mod session;
pub mod simple;
pub mod simulate;

pub use press::{KeyReport, run_press};
pub use session::{FileStore, GameStore, MemoryStore, load_game, save_game, start_new_game};
pub use simple::run_simple;
pub use simulate::{SimulationConfig, SimulationResult, run_simulation};
