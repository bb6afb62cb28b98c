//! Terminal output formatting
//!
//! Colored boards, share grids and command results.

pub mod display;
pub mod formatters;

pub use display::{print_board, print_simulation_result, render_board};
