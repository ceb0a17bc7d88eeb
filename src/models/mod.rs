//! Beer's-Law working-curve model.
//!
//! The model is implemented as small, pure functions so that the CLI, the TUI
//! and exports can share it without any state.

pub mod working_curve;

pub use working_curve::*;
