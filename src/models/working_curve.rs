//! Beer's-Law working curve.
//!
//! All conversions derive from the single relation
//!
//! ```text
//! Cd = dp · ln(E / Ec)        E = Ec · exp(Cd / dp)
//! ```
//!
//! where `dp` is the penetration depth (µm), `Ec` the critical exposure
//! (mJ/cm²), `E` the delivered exposure and `Cd` the cured depth.
//!
//! Every function is pure; inputs are validated on each call.

use crate::domain::{
    CURVE_EXPOSURE_MAX_FACTOR, CURVE_EXPOSURE_MIN_FACTOR, CurvePoint, ExposureSolution, PrintThrough,
    Summation,
};
use crate::error::ModelError;
use crate::math::decay_sum;

fn ensure_positive(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ModelError::invalid(name, value, "finite and > 0"))
    }
}

fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ModelError::invalid(name, value, "finite and >= 0"))
    }
}

fn ensure_layers(layers: usize) -> Result<usize, ModelError> {
    if layers >= 1 {
        Ok(layers)
    } else {
        Err(ModelError::invalid("layers", layers as f64, ">= 1"))
    }
}

fn ensure_finite_sum(name: &'static str, sum: f64) -> Result<f64, ModelError> {
    if sum.is_finite() {
        Ok(sum)
    } else {
        Err(ModelError::invalid(name, sum, "finite (layer sum overflowed)"))
    }
}

/// Sample the working curve at `sample_count` exposures evenly spaced over `[0.5·ec, 10·ec]`.
///
/// Points are returned in ascending exposure order. Cure depths below the
/// critical exposure are negative and left as-is; plotting code decides how to show them.
pub fn generate_curve(dp: f64, ec: f64, sample_count: usize) -> Result<Vec<CurvePoint>, ModelError> {
    let dp = ensure_positive("dp", dp)?;
    let ec = ensure_positive("ec", ec)?;
    if sample_count == 0 {
        return Err(ModelError::invalid("sample_count", 0.0, ">= 1"));
    }

    let start = CURVE_EXPOSURE_MIN_FACTOR * ec;
    let stop = CURVE_EXPOSURE_MAX_FACTOR * ec;
    if !stop.is_finite() {
        return Err(ModelError::invalid("ec", ec, "small enough that 10·ec is finite"));
    }
    let step = if sample_count > 1 {
        (stop - start) / (sample_count as f64 - 1.0)
    } else {
        0.0
    };

    let points = (0..sample_count)
        .map(|i| {
            // Pin the last sample to the exact upper bound.
            let exposure = if sample_count > 1 && i == sample_count - 1 {
                stop
            } else {
                start + step * i as f64
            };
            CurvePoint {
                exposure,
                cure_depth: dp * (exposure / ec).ln(),
            }
        })
        .collect();

    Ok(points)
}

/// Cured depth (µm) for a given exposure: `dp · ln(exposure / ec)`.
///
/// The result is negative below the critical exposure; callers treat `<= 0` as uncured.
pub fn cure_depth(dp: f64, ec: f64, exposure: f64) -> Result<f64, ModelError> {
    let dp = ensure_positive("dp", dp)?;
    let ec = ensure_positive("ec", ec)?;
    let exposure = ensure_positive("exposure", exposure)?;
    Ok(dp * (exposure / ec).ln())
}

/// Exposure (mJ/cm²) needed to cure `cure_depth` microns: `ec · exp(cure_depth / dp)`.
///
/// Only positive depths with a positive `dp` have an answer; everything else is
/// [`ExposureSolution::Unsolvable`].
pub fn exposure_for_cure_depth(dp: f64, ec: f64, cure_depth: f64) -> Result<ExposureSolution, ModelError> {
    let ec = ensure_positive("ec", ec)?;
    if !(dp.is_finite() && dp > 0.0 && cure_depth.is_finite() && cure_depth > 0.0) {
        return Ok(ExposureSolution::Unsolvable);
    }
    Ok(ExposureSolution::Solved(ec * (cure_depth / dp).exp()))
}

/// Total exposure received by a bottom layer from itself and the `layers - 1` layers above it.
pub fn volumetric_exposure(dp: f64, exposure: f64, dz: f64, summation: Summation) -> Result<f64, ModelError> {
    let dp = ensure_positive("dp", dp)?;
    let exposure = ensure_non_negative("exposure", exposure)?;
    let dz = ensure_positive("dz", dz)?;
    let layers = ensure_layers(summation.layers)?;

    ensure_finite_sum(
        "volumetric_exposure",
        decay_sum(summation.method, exposure, dz, dp, 0, layers),
    )
}

/// Extra exposure from the layers printed on top, and the cure depth it corresponds to.
///
/// The depth is clamped to zero: an extra exposure below `ec` adds no cured material.
pub fn print_through_exposure(
    dp: f64,
    ec: f64,
    exposure: f64,
    dz: f64,
    summation: Summation,
) -> Result<PrintThrough, ModelError> {
    let dp = ensure_positive("dp", dp)?;
    let ec = ensure_positive("ec", ec)?;
    let exposure = ensure_non_negative("exposure", exposure)?;
    let dz = ensure_positive("dz", dz)?;
    let layers = ensure_layers(summation.layers)?;

    let extra = ensure_finite_sum(
        "print_through_exposure",
        decay_sum(summation.method, exposure, dz, dp, 1, layers),
    )?;
    let depth = if extra > 0.0 {
        cure_depth(dp, ec, extra)?.max(0.0)
    } else {
        0.0
    };

    Ok(PrintThrough {
        exposure: extra,
        cure_depth: depth,
    })
}
