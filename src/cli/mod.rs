//! Command-line parsing for the interest burden report.
//!
//! Parsing stays here; dispatch lives in `crate::app`.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
///
/// With no flags, `burden` fetches FRED data (falling back to demonstration
/// data), writes the SVG chart and prints the summary.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "burden",
    version,
    about = "US federal interest burden report (interest payments as % of revenue, FRED-based)"
)]
pub struct Cli {
    /// Skip FRED and use demonstration data.
    #[arg(long)]
    pub demo: bool,

    /// Output path for the SVG chart.
    #[arg(long, value_name = "PATH", default_value = "interest_burden.svg")]
    pub chart: PathBuf,

    /// Do not write the SVG chart.
    #[arg(long)]
    pub no_chart: bool,

    /// Also print an ASCII plot of the burden series.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the quarterly table to CSV.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_render_chart_only() {
        let cli = Cli::parse_from(["burden"]);
        assert!(!cli.demo);
        assert_eq!(cli.chart, PathBuf::from("interest_burden.svg"));
        assert!(!cli.no_chart);
        assert!(!cli.plot);
        assert_eq!((cli.width, cli.height), (100, 25));
        assert!(cli.export.is_none());
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::parse_from([
            "burden", "--demo", "--chart", "out.svg", "--no-chart", "--plot", "--width", "60", "--height", "12",
            "--export", "table.csv",
        ]);
        assert!(cli.demo && cli.no_chart && cli.plot);
        assert_eq!(cli.chart, PathBuf::from("out.svg"));
        assert_eq!((cli.width, cli.height), (60, 12));
        assert_eq!(cli.export, Some(PathBuf::from("table.csv")));
    }
}
