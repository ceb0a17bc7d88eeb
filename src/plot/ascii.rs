//! ASCII plotting of the working curve for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - working curve: `-` line
//! - optional marker at the current exposure: `x`
//!
//! The y-axis starts at zero cure depth; the uncured part of the curve is
//! flattened onto the bottom row.

use crate::domain::CurvePoint;
use crate::io::CurveFile;

/// Render a working curve, optionally marking one point on it.
pub fn render_ascii_plot(curve: &[CurvePoint], marker: Option<CurvePoint>, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = exposure_range(curve).unwrap_or((0.0, 1.0));
    let y_max = max_depth(curve).unwrap_or(1.0);
    let (y_min, y_max) = (0.0, y_max + y_max * 0.05);

    let mut grid = vec![vec![' '; width]; height];

    draw_curve(&mut grid, curve, x_min, x_max, y_min, y_max);

    if let Some(m) = marker {
        if m.exposure >= x_min && m.exposure <= x_max {
            let x = map_x(m.exposure, x_min, x_max, width);
            let y = map_y(m.cure_depth, y_min, y_max, height);
            grid[y][x] = 'x';
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: exposure=[{x_min:.2}, {x_max:.2}] mJ/cm^2 | cure depth=[{y_min:.2}, {y_max:.2}] um\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Render a saved curve file.
pub fn render_ascii_plot_from_curve_file(curve: &CurveFile, width: usize, height: usize) -> String {
    render_ascii_plot(&curve.points, None, width, height)
}

fn exposure_range(curve: &[CurvePoint]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for p in curve {
        min_x = min_x.min(p.exposure);
        max_x = max_x.max(p.exposure);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn max_depth(curve: &[CurvePoint]) -> Option<f64> {
    let max_y = curve
        .iter()
        .map(|p| p.cure_depth)
        .fold(f64::NEG_INFINITY, f64::max);
    if max_y.is_finite() && max_y > 0.0 {
        Some(max_y)
    } else {
        None
    }
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[CurvePoint], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for p in curve {
        let x = map_x(p.exposure, x_min, x_max, width);
        let y = map_y(p.cure_depth, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, '-');
        } else {
            grid[y][x] = '-';
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(exposure: f64, cure_depth: f64) -> CurvePoint {
        CurvePoint { exposure, cure_depth }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let curve = vec![pt(0.0, 0.0), pt(10.0, 10.0)];
        let txt = render_ascii_plot(&curve, Some(pt(5.0, 5.0)), 10, 5);
        let expected = concat!(
            "Plot: exposure=[0.00, 10.00] mJ/cm^2 | cure depth=[0.00, 10.50] um\n",
            "        --\n",
            "      --  \n",
            "    -x    \n",
            "  --      \n",
            "--        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn uncured_region_sits_on_bottom_row() {
        let curve = crate::models::generate_curve(120.0, 25.0, 200).unwrap();
        let txt = render_ascii_plot(&curve, None, 40, 10);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(rows.len(), 10);
        // The first samples (exposure < ec) have negative depth and are clipped to the zero line.
        assert!(rows[9].starts_with('-'), "{txt}");
        assert!(txt.starts_with("Plot: exposure=[12.50, 250.00]"));
    }

    #[test]
    fn marker_outside_curve_is_skipped() {
        let curve = vec![pt(0.0, 0.0), pt(10.0, 10.0)];
        let txt = render_ascii_plot(&curve, Some(pt(50.0, 5.0)), 10, 5);
        assert!(txt.lines().skip(1).all(|row| !row.contains('x')), "{txt}");
    }
}
