//! Chart rendering for the burden series.
//!
//! - `chart`: SVG chart via Plotters
//! - `ascii`: fixed-size terminal plot

use plotters::style::RGBColor;

pub mod ascii;
pub mod chart;

pub use ascii::render_ascii_plot;
pub use chart::{ChartStyle, render_burden_chart};

/// A horizontal risk reference line.
#[derive(Debug, Clone, Copy)]
pub struct Threshold {
    pub level: f64,
    pub label: &'static str,
    pub color: RGBColor,
}

/// Burden levels (% of revenue) marked on every chart, highest first.
pub const RISK_THRESHOLDS: [Threshold; 4] = [
    Threshold {
        level: 20.0,
        label: "Critical Level (20%)",
        color: RGBColor(255, 0, 0),
    },
    Threshold {
        level: 15.0,
        label: "High Risk (15%)",
        color: RGBColor(255, 165, 0),
    },
    Threshold {
        level: 10.0,
        label: "Moderate Risk (10%)",
        color: RGBColor(255, 215, 0),
    },
    Threshold {
        level: 5.0,
        label: "Comfortable (5%)",
        color: RGBColor(0, 128, 0),
    },
];
