//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - curve samples and solver outcomes (`CurvePoint`, `ExposureSolution`, `PrintThrough`)
//! - the session inputs (`WorkingCurveInputs`) and defaults
//! - recompute outputs (`Evaluation`)

pub mod types;

pub use types::*;
