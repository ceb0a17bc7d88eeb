//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by the pure model functions
//! - exported to JSON/CSV
//! - reloaded later for plotting

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::math::SeriesMethod;

/// Default number of exposure samples on a generated working curve.
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

/// Default number of layers summed for cumulative exposure.
///
/// Large enough that the geometric tail is negligible for any practical `dz/dp`.
pub const DEFAULT_LAYERS: usize = 1000;

/// Curve exposure domain, as multiples of the critical exposure.
pub const CURVE_EXPOSURE_MIN_FACTOR: f64 = 0.5;
pub const CURVE_EXPOSURE_MAX_FACTOR: f64 = 10.0;

/// One sample of the working curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// mJ/cm².
    pub exposure: f64,
    /// Microns. Values `<= 0` mean the resin is not cured.
    pub cure_depth: f64,
}

/// Result of solving the exposure needed for a target cure depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExposureSolution {
    /// Exposure in mJ/cm².
    Solved(f64),
    /// No positive exposure produces the requested depth (`cure_depth <= 0` or `dp <= 0`).
    Unsolvable,
}

impl ExposureSolution {
    pub fn value(self) -> Option<f64> {
        match self {
            ExposureSolution::Solved(v) => Some(v),
            ExposureSolution::Unsolvable => None,
        }
    }
}

/// Extra exposure and extra cure depth a layer receives from the layers printed on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintThrough {
    /// mJ/cm².
    pub exposure: f64,
    /// Microns, never negative.
    pub cure_depth: f64,
}

/// How many layers to sum and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summation {
    pub layers: usize,
    pub method: SeriesMethod,
}

impl Default for Summation {
    fn default() -> Self {
        Self {
            layers: DEFAULT_LAYERS,
            method: SeriesMethod::Sum,
        }
    }
}

/// The five user-facing inputs of a working-curve session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkingCurveInputs {
    /// Penetration depth `dp` (µm).
    pub penetration_depth: f64,
    /// Critical exposure `ec` (mJ/cm²).
    pub critical_exposure: f64,
    /// Delivered exposure (mJ/cm²).
    pub exposure: f64,
    /// Slice thickness `dz` (µm).
    pub slice_thickness: f64,
    /// Target cure depth to solve an exposure for (µm).
    pub target_cure_depth: f64,
}

impl Default for WorkingCurveInputs {
    fn default() -> Self {
        Self {
            penetration_depth: 120.0,
            critical_exposure: 25.0,
            exposure: 0.0,
            slice_thickness: 10.0,
            target_cure_depth: 1.0,
        }
    }
}

/// Everything a single recompute produces.
///
/// Each output carries its own result: an out-of-domain input only fails the
/// outputs that depend on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub curve: Result<Vec<CurvePoint>, ModelError>,
    /// Cure depth at `inputs.exposure`; `Ok(None)` when the exposure is not positive.
    pub cure_depth_at_exposure: Result<Option<f64>, ModelError>,
    pub solved_exposure: Result<ExposureSolution, ModelError>,
    pub volumetric_exposure: Result<f64, ModelError>,
    pub print_through: Result<PrintThrough, ModelError>,
    pub summation: Summation,
}

impl Evaluation {
    /// First failing output, in display order.
    pub fn first_error(&self) -> Option<ModelError> {
        self.curve
            .as_ref()
            .err()
            .or(self.cure_depth_at_exposure.as_ref().err())
            .or(self.solved_exposure.as_ref().err())
            .or(self.volumetric_exposure.as_ref().err())
            .or(self.print_through.as_ref().err())
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_inputs_match_ui_defaults() {
        let d = WorkingCurveInputs::default();
        assert_eq!(d.penetration_depth, 120.0);
        assert_eq!(d.critical_exposure, 25.0);
        assert_eq!(d.exposure, 0.0);
        assert_eq!(d.slice_thickness, 10.0);
        assert_eq!(d.target_cure_depth, 1.0);
    }

    #[test]
    fn unsolvable_has_no_value() {
        assert_eq!(ExposureSolution::Unsolvable.value(), None);
        assert_eq!(ExposureSolution::Solved(3.0).value(), Some(3.0));
    }
}
