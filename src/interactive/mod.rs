//! Full-screen terminal player

mod app;
mod rendering;

pub use app::{App, Statistics, run_tui};
