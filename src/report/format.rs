//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the model code stays clean and testable
//! - output changes are localized (the TUI and CLI print the same lines)

use std::fmt::Display;

use crate::domain::{Evaluation, ExposureSolution, PrintThrough, WorkingCurveInputs};
use crate::error::ModelError;

/// `"Set exposure to: <v>"`, or `"Set exposure to: n/a"` when there is no answer.
pub fn format_solved_exposure(solution: ExposureSolution) -> String {
    match solution {
        ExposureSolution::Solved(v) => format!("Set exposure to: {v:.2}"),
        ExposureSolution::Unsolvable => "Set exposure to: n/a".to_string(),
    }
}

pub fn format_volumetric(volumetric: f64) -> String {
    format!("{volumetric:.2} mJ / cm^2 volumetric exposure")
}

pub fn format_print_through(pt: &PrintThrough) -> String {
    format!(
        "{:.2} mJ / cm^2 \"print through\" exposure and {:.2} microns \"print through\" cure depth",
        pt.exposure, pt.cure_depth
    )
}

pub fn format_cure_depth(cure_depth: Option<f64>) -> String {
    match cure_depth {
        Some(cd) if cd > 0.0 => format!("Cure depth: {cd:.2} microns"),
        Some(cd) => format!("Cure depth: {cd:.2} microns (not cured)"),
        None => "Cure depth: n/a".to_string(),
    }
}

/// Format one output, or its error under the given label when it failed.
pub fn format_output<T>(
    label: impl Display,
    result: &Result<T, ModelError>,
    format: impl FnOnce(&T) -> String,
) -> String {
    match result {
        Ok(value) => format(value),
        Err(e) => format!("{label}: {e}"),
    }
}

/// Format the full run summary (inputs + every derived value).
///
/// Each output gets its own line, so one failing output never hides the others.
pub fn format_run_summary(inputs: &WorkingCurveInputs, eval: &Evaluation) -> String {
    let mut out = String::new();

    out.push_str("=== cure - Resin Working Curve ===\n");
    out.push_str(&format!(
        "Penetration depth: {:.2} um | Critical exposure: {:.2} mJ/cm^2\n",
        inputs.penetration_depth, inputs.critical_exposure
    ));
    out.push_str(&format!(
        "Exposure: {:.2} mJ/cm^2 | Slice thickness: {:.2} um | Target cure depth: {:.2} um\n",
        inputs.exposure, inputs.slice_thickness, inputs.target_cure_depth
    ));
    out.push_str(&format!(
        "Layers: {} ({})\n",
        eval.summation.layers,
        eval.summation.method.display_name()
    ));

    out.push('\n');
    if let Err(e) = &eval.curve {
        out.push_str(&format!("Working curve: {e}\n"));
    }
    for line in [
        format_output("Cure depth", &eval.cure_depth_at_exposure, |cd| format_cure_depth(*cd)),
        format_output("Set exposure to", &eval.solved_exposure, |s| format_solved_exposure(*s)),
        format_output("Volumetric exposure", &eval.volumetric_exposure, |v| format_volumetric(*v)),
        format_output("Print through", &eval.print_through, format_print_through),
    ] {
        out.push_str(&line);
        out.push('\n');
    }

    out
}
