//! Export a working curve to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::domain::CurvePoint;
use crate::error::{AppError, EXIT_USAGE};

/// Write curve samples to a CSV file.
pub fn write_curve_csv(path: &Path, points: &[CurvePoint]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    write_curve_rows(&mut out, points)
        .and_then(|()| out.flush())
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write export CSV: {e}")))?;

    info!(path = %path.display(), points = points.len(), "wrote curve CSV");
    Ok(())
}

fn write_curve_rows(out: &mut impl Write, points: &[CurvePoint]) -> std::io::Result<()> {
    writeln!(out, "exposure_mj_cm2,cure_depth_um")?;
    for p in points {
        writeln!(out, "{:.6},{:.6}", p.exposure, p.cure_depth)?;
    }
    Ok(())
}
