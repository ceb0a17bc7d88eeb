//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads settings and initializes logging
//! - parses CLI arguments
//! - runs the working-curve computations
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{CalcArgs, Command, CurveArgs, PlotArgs, SummationArgs, TuiArgs};
use crate::config::Settings;
use crate::domain::{CurvePoint, Summation};
use crate::error::AppError;
use crate::io::CurveFile;

pub mod pipeline;

/// Entry point for the `cure` binary.
pub fn run() -> Result<(), AppError> {
    let settings = Settings::from_env()?;
    init_tracing(&settings);

    // `cure` and `cure --dp 140` behave like `cure tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    debug!(command = ?cli.command, "parsed command line");

    match cli.command {
        Command::Calc(args) => handle_calc(args, &settings),
        Command::Curve(args) => handle_curve(args, &settings),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args, &settings),
    }
}

/// Logs go to stderr so stdout stays clean for reports and the TUI.
///
/// `RUST_LOG` wins over `CURE_LOG`.
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_calc(args: CalcArgs, settings: &Settings) -> Result<(), AppError> {
    let inputs = args.resin.inputs();
    let summation = summation_from(&args.summation, settings);
    let eval = pipeline::evaluate(&inputs, settings.sample_count, summation);

    println!("{}", crate::report::format_run_summary(&inputs, &eval));

    if args.plot {
        if let Ok(curve) = &eval.curve {
            let marker = eval
                .cure_depth_at_exposure
                .ok()
                .flatten()
                .map(|cure_depth| CurvePoint {
                    exposure: inputs.exposure,
                    cure_depth,
                });
            println!(
                "{}",
                crate::plot::render_ascii_plot(curve, marker, args.width, args.height)
            );
        }
    }

    // Every output was printed above; the exit code still reports the first failure.
    match eval.first_error() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn handle_curve(args: CurveArgs, settings: &Settings) -> Result<(), AppError> {
    let samples = args.samples.unwrap_or(settings.sample_count);
    let points = crate::models::generate_curve(args.dp, args.ec, samples)?;
    info!(dp = args.dp, ec = args.ec, samples, "generated working curve");

    if args.plot {
        println!(
            "{}",
            crate::plot::render_ascii_plot(&points, None, args.width, args.height)
        );
    } else if args.export_csv.is_none() && args.export_json.is_none() {
        print!("{}", format_points(&points));
    }

    if let Some(path) = &args.export_csv {
        crate::io::write_curve_csv(path, &points)?;
    }
    if let Some(path) = &args.export_json {
        crate::io::write_curve_json(path, &CurveFile::new(args.dp, args.ec, points))?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::read_curve_json(&args.curve)?;
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);

    println!("{plot}");
    Ok(())
}

fn handle_tui(args: TuiArgs, settings: &Settings) -> Result<(), AppError> {
    let summation = summation_from(&args.summation, settings);
    crate::tui::run(args.resin.inputs(), settings.sample_count, summation)
}

fn summation_from(args: &SummationArgs, settings: &Settings) -> Summation {
    let defaults = settings.summation();
    Summation {
        layers: args.layers.unwrap_or(defaults.layers),
        method: args.series.unwrap_or(defaults.method),
    }
}

fn format_points(points: &[CurvePoint]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>14} {:>14}\n", "exposure", "cure_depth"));
    for p in points {
        out.push_str(&format!("{:>14.4} {:>14.4}\n", p.exposure, p.cure_depth));
    }
    out
}

/// Rewrite argv so `cure` defaults to `cure tui`.
///
/// Rules:
/// - `cure`                      -> `cure tui`
/// - `cure --dp 140 ...`         -> `cure tui --dp 140 ...`
/// - `cure --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "calc" | "curve" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
