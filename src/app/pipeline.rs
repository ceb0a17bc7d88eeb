//! Shared "recompute" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! inputs -> curve -> cure depth -> solved exposure -> cumulative exposure
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::debug;

use crate::domain::{Evaluation, Summation, WorkingCurveInputs};
use crate::models::{
    cure_depth, exposure_for_cure_depth, generate_curve, print_through_exposure, volumetric_exposure,
};

/// Recompute every output for one set of inputs.
///
/// Outputs are computed independently: an out-of-domain input fails only the
/// outputs that use it. A non-positive exposure has no cure depth (`Ok(None)`);
/// a negative one still fails the cumulative exposures.
pub fn evaluate(inputs: &WorkingCurveInputs, sample_count: usize, summation: Summation) -> Evaluation {
    let dp = inputs.penetration_depth;
    let ec = inputs.critical_exposure;
    let dz = inputs.slice_thickness;

    let curve = generate_curve(dp, ec, sample_count);

    let cure_depth_at_exposure = if inputs.exposure > 0.0 {
        cure_depth(dp, ec, inputs.exposure).map(Some)
    } else {
        Ok(None)
    };

    let solved_exposure = exposure_for_cure_depth(dp, ec, inputs.target_cure_depth);
    let volumetric = volumetric_exposure(dp, inputs.exposure, dz, summation);
    let print_through = print_through_exposure(dp, ec, inputs.exposure, dz, summation);

    debug!(
        dp,
        ec,
        exposure = inputs.exposure,
        dz,
        volumetric = ?volumetric,
        print_through = ?print_through,
        method = summation.method.display_name(),
        "recomputed working curve"
    );

    Evaluation {
        curve,
        cure_depth_at_exposure,
        solved_exposure,
        volumetric_exposure: volumetric,
        print_through,
        summation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExposureSolution;
    use crate::error::ModelError;

    #[test]
    fn defaults_evaluate_cleanly() {
        let eval = evaluate(&WorkingCurveInputs::default(), 1000, Summation::default());
        assert_eq!(eval.first_error(), None);
        assert_eq!(eval.curve.as_ref().unwrap().len(), 1000);
        assert_eq!(eval.cure_depth_at_exposure, Ok(None));
        assert!(matches!(eval.solved_exposure, Ok(ExposureSolution::Solved(e)) if (e - 25.21).abs() < 0.01));
        assert_eq!(eval.volumetric_exposure, Ok(0.0));
        let pt = eval.print_through.unwrap();
        assert_eq!(pt.exposure, 0.0);
        assert_eq!(pt.cure_depth, 0.0);
    }

    #[test]
    fn positive_exposure_yields_depth() {
        let inputs = WorkingCurveInputs {
            exposure: 250.0,
            ..WorkingCurveInputs::default()
        };
        let eval = evaluate(&inputs, 100, Summation::default());
        let cd = eval.cure_depth_at_exposure.unwrap().unwrap();
        assert!((cd - 276.31).abs() < 0.01);
        assert!(eval.volumetric_exposure.unwrap() > 250.0);
    }

    #[test]
    fn unsolvable_target_is_not_an_error() {
        let inputs = WorkingCurveInputs {
            target_cure_depth: 0.0,
            ..WorkingCurveInputs::default()
        };
        let eval = evaluate(&inputs, 10, Summation::default());
        assert_eq!(eval.solved_exposure, Ok(ExposureSolution::Unsolvable));
        assert_eq!(eval.first_error(), None);
    }

    #[test]
    fn negative_exposure_only_fails_cumulative_outputs() {
        let inputs = WorkingCurveInputs {
            exposure: -1.0,
            ..WorkingCurveInputs::default()
        };
        let eval = evaluate(&inputs, 10, Summation::default());
        assert_eq!(eval.curve.as_ref().map(Vec::len), Ok(10));
        assert_eq!(eval.cure_depth_at_exposure, Ok(None));
        assert!(matches!(eval.solved_exposure, Ok(ExposureSolution::Solved(_))));
        assert!(matches!(
            eval.volumetric_exposure,
            Err(ModelError::InvalidParameter { name: "exposure", .. })
        ));
        assert!(matches!(
            eval.print_through,
            Err(ModelError::InvalidParameter { name: "exposure", .. })
        ));
    }

    #[test]
    fn zero_slice_thickness_keeps_solved_exposure() {
        let inputs = WorkingCurveInputs {
            exposure: 250.0,
            slice_thickness: 0.0,
            ..WorkingCurveInputs::default()
        };
        let eval = evaluate(&inputs, 10, Summation::default());
        assert!(eval.curve.is_ok());
        assert!(eval.cure_depth_at_exposure.unwrap().is_some());
        assert!(matches!(eval.solved_exposure, Ok(ExposureSolution::Solved(e)) if (e - 25.21).abs() < 0.01));
        assert!(matches!(
            eval.volumetric_exposure,
            Err(ModelError::InvalidParameter { name: "dz", .. })
        ));
        assert!(matches!(
            eval.print_through,
            Err(ModelError::InvalidParameter { name: "dz", .. })
        ));
        assert!(matches!(eval.first_error(), Some(ModelError::InvalidParameter { name: "dz", .. })));
    }

    #[test]
    fn zero_penetration_depth_reports_unsolvable() {
        let inputs = WorkingCurveInputs {
            penetration_depth: 0.0,
            ..WorkingCurveInputs::default()
        };
        let eval = evaluate(&inputs, 10, Summation::default());
        assert!(matches!(eval.curve, Err(ModelError::InvalidParameter { name: "dp", .. })));
        assert_eq!(eval.solved_exposure, Ok(ExposureSolution::Unsolvable));
        assert!(eval.volumetric_exposure.is_err());
    }
}
