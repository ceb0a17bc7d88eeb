//! Mathematical utilities: geometric decay sums.

pub mod series;

pub use series::*;
