//! Command-line parsing for the working-curve helper.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the model code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::WorkingCurveInputs;
use crate::math::SeriesMethod;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cure", version, about = "Resin working-curve helper (Beer's-Law exposure model)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute cure depth, solved exposure, volumetric and print-through exposure.
    Calc(CalcArgs),
    /// Generate the working curve and optionally plot/export it.
    Curve(CurveArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// Every edit recomputes the curve and all derived values, like the
    /// `calc` command does once.
    Tui(TuiArgs),
}

/// Resin and print parameters shared by all computing commands.
#[derive(Debug, Args, Clone)]
pub struct ResinArgs {
    /// Penetration depth dp (µm).
    #[arg(long, default_value_t = 120.0, allow_negative_numbers = true)]
    pub dp: f64,

    /// Critical exposure Ec (mJ/cm²).
    #[arg(long, default_value_t = 25.0, allow_negative_numbers = true)]
    pub ec: f64,

    /// Delivered exposure (mJ/cm²).
    #[arg(short = 'e', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub exposure: f64,

    /// Slice thickness dz (µm).
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub dz: f64,

    /// Target cure depth to solve an exposure for (µm).
    #[arg(short = 'c', long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub cure_depth: f64,
}

impl ResinArgs {
    pub fn inputs(&self) -> WorkingCurveInputs {
        WorkingCurveInputs {
            penetration_depth: self.dp,
            critical_exposure: self.ec,
            exposure: self.exposure,
            slice_thickness: self.dz,
            target_cure_depth: self.cure_depth,
        }
    }
}

/// Overrides for the cumulative-exposure summation (defaults come from the environment).
#[derive(Debug, Args, Clone)]
pub struct SummationArgs {
    /// Number of layers summed for volumetric/print-through exposure.
    #[arg(long)]
    pub layers: Option<usize>,

    /// Summation method.
    #[arg(long, value_enum)]
    pub series: Option<SeriesMethod>,
}

#[derive(Debug, Args, Clone)]
pub struct CalcArgs {
    #[command(flatten)]
    pub resin: ResinArgs,

    #[command(flatten)]
    pub summation: SummationArgs,

    /// Also render the working curve as an ASCII plot.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct CurveArgs {
    /// Penetration depth dp (µm).
    #[arg(long, default_value_t = 120.0, allow_negative_numbers = true)]
    pub dp: f64,

    /// Critical exposure Ec (mJ/cm²).
    #[arg(long, default_value_t = 25.0, allow_negative_numbers = true)]
    pub ec: f64,

    /// Number of exposure samples (defaults to CURE_SAMPLES or 1000).
    #[arg(short = 'n', long)]
    pub samples: Option<usize>,

    /// Render the curve as an ASCII plot.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the curve samples to CSV.
    #[arg(long = "export-csv")]
    pub export_csv: Option<PathBuf>,

    /// Export the curve (parameters + samples) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Options for plotting a saved curve.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Curve JSON file produced by `cure curve --export-json`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub resin: ResinArgs,

    #[command(flatten)]
    pub summation: SummationArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calc_defaults_match_ui_defaults() {
        let cli = Cli::parse_from(["cure", "calc"]);
        let Command::Calc(args) = cli.command else {
            panic!("expected calc");
        };
        assert_eq!(args.resin.inputs(), WorkingCurveInputs::default());
        assert!(args.summation.layers.is_none());
        assert!(!args.plot);
    }

    #[test]
    fn calc_accepts_negative_cure_depth() {
        let cli = Cli::parse_from(["cure", "calc", "--exposure", "250", "--cure-depth", "-1", "--series", "closed-form"]);
        let Command::Calc(args) = cli.command else {
            panic!("expected calc");
        };
        assert_eq!(args.resin.exposure, 250.0);
        assert_eq!(args.resin.cure_depth, -1.0);
        assert_eq!(args.summation.series, Some(SeriesMethod::ClosedForm));
    }

    #[test]
    fn curve_exports() {
        let cli = Cli::parse_from(["cure", "curve", "-n", "500", "--export-json", "c.json"]);
        let Command::Curve(args) = cli.command else {
            panic!("expected curve");
        };
        assert_eq!(args.samples, Some(500));
        assert_eq!(args.export_json, Some(PathBuf::from("c.json")));
        assert!(args.export_csv.is_none());
    }
}
