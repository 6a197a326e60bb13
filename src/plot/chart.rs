//! Plotters-powered burden chart, written as SVG.
//!
//! All styling comes in through `ChartStyle`; nothing here reads or mutates
//! process-wide state. The chart shows:
//! - the burden series with point markers
//! - dashed risk thresholds and shaded risk zones
//! - the most recent quarters redrawn as a heavier "recent trend" line
//! - the current quarter marked and annotated

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::domain::quarter::fractional_year;
use crate::domain::{DerivedRow, DerivedTable};
use crate::error::AppError;
use crate::plot::{RISK_THRESHOLDS, Threshold};

/// A shaded horizontal band (y in % of revenue).
#[derive(Debug, Clone, Copy)]
pub struct RiskZone {
    pub from: f64,
    pub to: f64,
    pub color: RGBColor,
    pub opacity: f64,
}

/// Rendering configuration for the burden chart.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub size: (u32, u32),
    pub font_family: &'static str,
    pub title: String,
    /// Second caption line under the title.
    pub subtitle: String,
    pub x_label: String,
    pub y_label: String,
    pub line_color: RGBColor,
    pub recent_color: RGBColor,
    pub current_color: RGBColor,
    pub annotation_color: RGBColor,
    /// Number of trailing quarters drawn as the recent trend (20 = 5 years).
    pub recent_quarters: usize,
    pub thresholds: Vec<Threshold>,
    pub zones: Vec<RiskZone>,
    /// Minimum top of the y-axis so every zone stays visible.
    pub y_floor_max: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let zone = |from, to, color, opacity| RiskZone {
            from,
            to,
            color,
            opacity,
        };
        Self {
            size: (1400, 800),
            font_family: "sans-serif",
            title: "US Federal Interest Payments as % of Revenue".to_string(),
            subtitle: "(The Ultimate Fiscal Stress Indicator)".to_string(),
            x_label: "Year".to_string(),
            y_label: "Interest Payments (% of Revenue)".to_string(),
            line_color: RGBColor(214, 39, 40),
            recent_color: RGBColor(139, 0, 0),
            current_color: RGBColor(255, 0, 0),
            annotation_color: RGBColor(255, 255, 0),
            recent_quarters: 20,
            thresholds: RISK_THRESHOLDS.to_vec(),
            zones: vec![
                zone(20.0, 25.0, RGBColor(255, 0, 0), 0.1),
                zone(15.0, 20.0, RGBColor(255, 165, 0), 0.1),
                zone(10.0, 15.0, RGBColor(255, 215, 0), 0.1),
                zone(0.0, 10.0, RGBColor(0, 128, 0), 0.05),
            ],
            y_floor_max: 25.0,
        }
    }
}

/// Render the burden chart to an SVG file at `path`.
///
/// The current point is the table's last row.
pub fn render_burden_chart(path: &Path, table: &DerivedTable, style: &ChartStyle) -> Result<(), AppError> {
    let current = table
        .current()
        .ok_or_else(|| AppError::new(4, "No data to chart."))?;

    draw_chart(path, table, current, style)
        .map_err(|e| AppError::new(4, format!("Failed to render chart '{}': {e}", path.display())))?;

    info!(path = %path.display(), "chart written");
    Ok(())
}

fn draw_chart(
    path: &Path,
    table: &DerivedTable,
    current: &DerivedRow,
    style: &ChartStyle,
) -> Result<(), Box<dyn Error>> {
    let points: Vec<(f64, f64)> = table
        .rows
        .iter()
        .map(|r| (fractional_year(r.date), r.interest_burden_pct))
        .collect();

    let (x0, x1) = x_bounds(&points);
    let y_top = points
        .iter()
        .map(|&(_, y)| y)
        .fold(style.y_floor_max, f64::max)
        * 1.05;

    let root = SVGBackend::new(path, style.size).into_drawing_area();
    root.fill(&WHITE)?;

    let plot_area = root.titled(&style.title, (style.font_family, 26).into_font())?;

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(&style.subtitle, (style.font_family, 18).into_font())
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(x0..x1, 0.0..y_top)?;

    chart
        .configure_mesh()
        .x_desc(&style.x_label)
        .y_desc(&style.y_label)
        .x_labels(12)
        .y_labels(10)
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format!("{v:.0}%"))
        .light_line_style(&WHITE)
        .bold_line_style(&BLACK.mix(0.1))
        .label_style((style.font_family, 14).into_font())
        .draw()?;

    // 1) Risk zones, behind everything else.
    chart.draw_series(style.zones.iter().map(|z| {
        Rectangle::new([(x0, z.from), (x1, z.to.min(y_top))], z.color.mix(z.opacity).filled())
    }))?;

    // 2) Dashed thresholds.
    let dash = (x1 - x0) / 120.0;
    for t in &style.thresholds {
        let line_style = t.color.mix(0.7).stroke_width(2);
        let legend_color = t.color;
        chart
            .draw_series(
                dash_segments(x0, x1, dash, dash * 0.6)
                    .into_iter()
                    .map(move |(a, b)| PathElement::new(vec![(a, t.level), (b, t.level)], line_style)),
            )?
            .label(t.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], legend_color.stroke_width(2)));
    }

    // 3) Burden series with markers.
    let line_color = style.line_color;
    chart
        .draw_series(LineSeries::new(points.iter().copied(), line_color.stroke_width(3)))?
        .label("Interest burden")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color.stroke_width(3)));
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 2, line_color.filled())))?;

    // 4) Recent trend.
    let recent_start = points.len().saturating_sub(style.recent_quarters);
    let recent_color = style.recent_color;
    chart
        .draw_series(LineSeries::new(
            points[recent_start..].iter().copied(),
            recent_color.mix(0.6).stroke_width(6),
        ))?
        .label(format!("Recent {}Q trend", style.recent_quarters))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], recent_color.stroke_width(6)));

    // 5) Current point + annotation.
    let current_xy = (fractional_year(current.date), current.interest_burden_pct);
    let label = format!("Current: {:.1}%", current.interest_burden_pct);
    let font = (style.font_family, 16).into_font().style(FontStyle::Bold);
    chart.draw_series(std::iter::once(
        EmptyElement::at(current_xy)
            + Circle::new((0, 0), 9, style.current_color.filled())
            + Circle::new((0, 0), 9, BLACK.stroke_width(2))
            + Rectangle::new([(-160, -52), (-20, -24)], style.annotation_color.mix(0.9).filled())
            + Text::new(label, (-152, -46), font),
    ))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .label_font((style.font_family, 14).into_font())
        .draw()?;

    root.present()?;
    Ok(())
}

fn x_bounds(points: &[(f64, f64)]) -> (f64, f64) {
    let min = points.iter().map(|&(x, _)| x).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|&(x, _)| x).fold(f64::NEG_INFINITY, f64::max);
    if min.is_finite() && max.is_finite() && max > min {
        (min, max)
    } else if min.is_finite() {
        // Single quarter: give it a one-year axis.
        (min - 0.5, min + 0.5)
    } else {
        (0.0, 1.0)
    }
}

/// Split `[x0, x1]` into dash segments of length `dash` separated by `gap`.
fn dash_segments(x0: f64, x1: f64, dash: f64, gap: f64) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    if !(dash > 0.0 && gap >= 0.0 && x1 > x0) {
        return out;
    }
    let mut start = x0;
    while start < x1 {
        let end = (start + dash).min(x1);
        out.push((start, end));
        start = end + gap;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_demo;

    #[test]
    fn dash_segments_cover_range_with_gaps() {
        let segs = dash_segments(0.0, 10.0, 2.0, 1.0);
        assert_eq!(segs, vec![(0.0, 2.0), (3.0, 5.0), (6.0, 8.0), (9.0, 10.0)]);
        assert!(dash_segments(0.0, 10.0, 0.0, 1.0).is_empty());
        assert!(dash_segments(5.0, 5.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn x_bounds_handles_single_point() {
        assert_eq!(x_bounds(&[(2000.0, 1.0), (2010.0, 2.0)]), (2000.0, 2010.0));
        assert_eq!(x_bounds(&[(2000.0, 1.0)]), (1999.5, 2000.5));
        assert_eq!(x_bounds(&[]), (0.0, 1.0));
    }

    #[test]
    fn default_style_uses_five_year_recent_window() {
        let style = ChartStyle::default();
        assert_eq!(style.recent_quarters, 20);
        assert_eq!(style.thresholds.len(), 4);
        assert_eq!(style.zones.len(), 4);
    }

    #[test]
    fn renders_svg_with_current_annotation() {
        let table = generate_demo().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("burden.svg");

        render_burden_chart(&path, &table, &ChartStyle::default()).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        let expected = format!("Current: {:.1}%", table.current().unwrap().interest_burden_pct);
        assert!(svg.contains(&expected));
        assert!(svg.contains("US Federal Interest Payments as % of Revenue"));
        assert!(svg.contains("(The Ultimate Fiscal Stress Indicator)"));
    }

    #[test]
    fn empty_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_burden_chart(&dir.path().join("x.svg"), &DerivedTable::default(), &ChartStyle::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
