//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a working curve:
//! - the resin parameters it was generated from (`dp`, `ec`)
//! - generation metadata (tool, timestamp)
//! - the sampled points for quick plotting

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::CurvePoint;
use crate::error::{AppError, EXIT_USAGE};

/// Serialized working curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    /// Penetration depth (µm).
    pub penetration_depth: f64,
    /// Critical exposure (mJ/cm²).
    pub critical_exposure: f64,
    pub points: Vec<CurvePoint>,
}

impl CurveFile {
    pub fn new(penetration_depth: f64, critical_exposure: f64, points: Vec<CurvePoint>) -> Self {
        Self {
            tool: "cure".to_string(),
            generated_at: Utc::now(),
            penetration_depth,
            critical_exposure,
            points,
        }
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, curve)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write curve JSON: {e}")))?;

    info!(path = %path.display(), points = curve.points.len(), "wrote curve JSON");
    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Invalid curve JSON: {e}")))?;
    if curve.points.is_empty() {
        return Err(AppError::new(EXIT_USAGE, "Curve JSON contains no points."));
    }
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_curve_reads_back() {
        let points = crate::models::generate_curve(120.0, 25.0, 20).unwrap();
        let curve = CurveFile::new(120.0, 25.0, points);

        let path = std::env::temp_dir().join(format!("cure_curve_{}.json", std::process::id()));
        write_curve_json(&path, &curve).unwrap();
        let loaded = read_curve_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.tool, "cure");
        assert_eq!(loaded.points.len(), 20);
        assert_eq!(loaded.penetration_depth, 120.0);
        assert_eq!(loaded.points[19].exposure, 250.0);
    }

    #[test]
    fn empty_curve_is_rejected() {
        let path = std::env::temp_dir().join(format!("cure_empty_{}.json", std::process::id()));
        write_curve_json(&path, &CurveFile::new(120.0, 25.0, Vec::new())).unwrap();
        let err = read_curve_json(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(err.to_string().contains("no points"));
    }
}
