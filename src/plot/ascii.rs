//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - burden series: `-` line
//! - risk thresholds inside the y-range: `.` rows
//! - current (last) quarter: `@`

use crate::domain::DerivedTable;
use crate::domain::quarter::fractional_year;
use crate::plot::RISK_THRESHOLDS;

/// Render the interest burden series as a fixed-size character grid.
pub fn render_ascii_plot(table: &DerivedTable, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (Some(first), Some(last)) = (table.first_date(), table.last_date()) else {
        return "No data to plot.\n".to_string();
    };

    let points: Vec<(f64, f64)> = table
        .rows
        .iter()
        .map(|r| (fractional_year(r.date), r.interest_burden_pct))
        .collect();

    let (x_min, x_max) = bounds(points.iter().map(|p| p.0)).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = match bounds(points.iter().map(|p| p.1)) {
        Some((lo, hi)) => pad_range(lo, hi, 0.05),
        // Flat series (or a single quarter): center on the value.
        None => flat_range(points.first().map_or(0.0, |p| p.1)),
    };

    let mut grid = vec![vec![' '; width]; height];

    // Series first; thresholds only fill blank cells.
    draw_curve(&mut grid, &points, x_min, x_max, y_min, y_max);

    for t in RISK_THRESHOLDS {
        if t.level > y_min && t.level < y_max {
            let row = map_y(t.level, y_min, y_max, height);
            for cell in grid[row].iter_mut().filter(|c| **c == ' ') {
                *cell = '.';
            }
        }
    }

    if let Some(&(x, y)) = points.last() {
        grid[map_y(y, y_min, y_max, height)][map_x(x, x_min, x_max, width)] = '@';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Interest burden (% of revenue): {}..{} | y=[{y_min:.2}, {y_max:.2}]%\n",
        first.format("%Y-%m"),
        last.format("%Y-%m"),
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// `(min, max)` of the values, or `None` if they don't span a range.
fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    (lo.is_finite() && hi.is_finite() && hi > lo).then_some((lo, hi))
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn flat_range(value: f64) -> (f64, f64) {
    let pad = (value.abs() * 0.05).max(1.0);
    (value - pad, value + pad)
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

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let cx = map_x(x, x_min, x_max, width);
        let cy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, cx, cy, '-');
        } else {
            grid[cy][cx] = '-';
        }
        prev = Some((cx, cy));
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
