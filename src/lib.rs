//! `working-curve` library crate.
//!
//! Beer's-Law working-curve model for photopolymer resins: cure depth from
//! exposure, the exposure needed for a target depth, and the cumulative
//! ("volumetric" / "print through") exposure from layers printed on top.
//!
//! The binary (`cure`) is a thin wrapper around this library so that:
//!
//! - core formulas are testable without spawning processes
//! - the same model serves the CLI, the TUI and exports

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
