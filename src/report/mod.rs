//! Reporting utilities: the text lines shown for each recompute.

pub mod format;

pub use format::*;
