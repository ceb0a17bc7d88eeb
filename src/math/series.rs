//! Truncated geometric decay sums.
//!
//! Cumulative exposure is modeled as a sum over printed layers, each one
//! attenuated by Beer's Law over the depth separating it from the layer of
//! interest:
//!
//! ```text
//! S(start, n) = Σ_{i=start}^{n-1} e · exp(-dz·i / dp)
//! ```
//!
//! This is a geometric series with ratio `r = exp(-dz/dp)`, so it also has the
//! closed form `e · r^start · (1 - r^(n-start)) / (1 - r)`.
//!
//! Numerical notes:
//! - For small `dz/dp`, `1 - r` suffers from catastrophic cancellation. Both
//!   `1 - r` and `1 - r^k` are computed as `-expm1(-x)`.
//! - Callers are responsible for validating `dp > 0`, `dz > 0`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How a decay sum is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesMethod {
    /// Add up every layer term explicitly.
    #[default]
    Sum,
    /// Use the geometric-series closed form.
    ClosedForm,
}

impl SeriesMethod {
    pub fn display_name(self) -> &'static str {
        match self {
            SeriesMethod::Sum => "sum",
            SeriesMethod::ClosedForm => "closed-form",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SeriesMethod::Sum => SeriesMethod::ClosedForm,
            SeriesMethod::ClosedForm => SeriesMethod::Sum,
        }
    }
}

/// Evaluate `Σ_{i=start}^{layers-1} exposure · exp(-dz·i/dp)` with the chosen method.
///
/// Returns `0.0` when `start >= layers` (no contributing terms).
pub fn decay_sum(method: SeriesMethod, exposure: f64, dz: f64, dp: f64, start: usize, layers: usize) -> f64 {
    match method {
        SeriesMethod::Sum => decay_sum_explicit(exposure, dz, dp, start, layers),
        SeriesMethod::ClosedForm => decay_sum_closed_form(exposure, dz, dp, start, layers),
    }
}

/// Explicit term-by-term summation.
pub fn decay_sum_explicit(exposure: f64, dz: f64, dp: f64, start: usize, layers: usize) -> f64 {
    (start..layers)
        .map(|i| exposure * (-(dz * i as f64) / dp).exp())
        .sum()
}

/// Closed-form geometric sum.
pub fn decay_sum_closed_form(exposure: f64, dz: f64, dp: f64, start: usize, layers: usize) -> f64 {
    if start >= layers {
        return 0.0;
    }
    let x = dz / dp;
    let terms = (layers - start) as f64;

    let first = exposure * (-x * start as f64).exp();
    // (1 - r^k) / (1 - r), both via expm1.
    let numer = -(-x * terms).exp_m1();
    let denom = -(-x).exp_m1();
    first * numer / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_range_sums_to_zero() {
        assert_eq!(decay_sum_explicit(25.0, 10.0, 120.0, 5, 5), 0.0);
        assert_eq!(decay_sum_closed_form(25.0, 10.0, 120.0, 5, 5), 0.0);
        assert_eq!(decay_sum_closed_form(25.0, 10.0, 120.0, 6, 5), 0.0);
    }

    #[test]
    fn single_term_is_undecayed_exposure() {
        let v = decay_sum_explicit(25.0, 10.0, 120.0, 0, 1);
        assert!((v - 25.0).abs() < 1e-12);
        let v = decay_sum_closed_form(25.0, 10.0, 120.0, 0, 1);
        assert!((v - 25.0).abs() < 1e-12);
    }

    #[test]
    fn methods_agree_for_small_ratio() {
        // dz/dp = 1e-4: the naive 1 - r would lose most significant digits.
        let a = decay_sum_explicit(1.0, 0.01, 100.0, 0, 1000);
        let b = decay_sum_closed_form(1.0, 0.01, 100.0, 0, 1000);
        assert!(((a - b) / a).abs() < 1e-9, "sum={a} closed={b}");
    }

    #[test]
    fn methods_agree_when_skipping_self_term() {
        let a = decay_sum(SeriesMethod::Sum, 25.0, 10.0, 120.0, 1, 1000);
        let b = decay_sum(SeriesMethod::ClosedForm, 25.0, 10.0, 120.0, 1, 1000);
        assert!(((a - b) / a).abs() < 1e-9, "sum={a} closed={b}");
    }

    #[test]
    fn toggled_flips_method() {
        assert_eq!(SeriesMethod::Sum.toggled(), SeriesMethod::ClosedForm);
        assert_eq!(SeriesMethod::ClosedForm.toggled(), SeriesMethod::Sum);
    }
}
