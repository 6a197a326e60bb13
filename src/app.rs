//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - sets up logging
//! - parses CLI arguments
//! - runs the data pipeline (FRED with demo fallback)
//! - writes the chart and prints the summary
//! - writes the optional export

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::plot::ChartStyle;

pub mod pipeline;

/// Entry point for the `burden` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();

    let cli = Cli::parse();
    let config = run_config_from_args(&cli);
    let today = chrono::Local::now().date_naive();
    tracing::info!(analysis_date = %today.format("%Y-%m-%d"), "starting interest burden analysis");

    let output = pipeline::run_pipeline(&config, today)?;

    if let Some(path) = &config.chart_path {
        crate::plot::render_burden_chart(path, &output.table, &ChartStyle::default())?;
    }

    if config.plot {
        let plot = crate::plot::render_ascii_plot(&output.table, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    println!("{}", crate::report::format_summary(&output.table, &output.origin, today));

    if let Some(path) = &config.export {
        crate::io::write_table_csv(path, &output.table)?;
        tracing::info!(path = %path.display(), rows = output.table.len(), "table exported");
    }

    Ok(())
}

/// Logs go to stderr so stdout stays the report. `RUST_LOG` overrides the
/// default `info` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run_config_from_args(args: &Cli) -> RunConfig {
    RunConfig {
        demo_only: args.demo,
        chart_path: (!args.no_chart).then(|| args.chart.clone()),
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export: args.export.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn no_chart_clears_chart_path() {
        let cli = Cli::parse_from(["burden", "--no-chart", "--chart", "x.svg"]);
        let config = run_config_from_args(&cli);
        assert!(config.chart_path.is_none());
    }

    #[test]
    fn defaults_map_to_full_run() {
        let cli = Cli::parse_from(["burden"]);
        let config = run_config_from_args(&cli);
        assert!(!config.demo_only);
        assert_eq!(config.chart_path, Some(PathBuf::from("interest_burden.svg")));
        assert!(!config.plot);
        assert!(config.export.is_none());
    }

    #[test]
    fn flags_carry_through() {
        let cli = Cli::parse_from(["burden", "--demo", "--plot", "--width", "40", "--export", "t.csv"]);
        let config = run_config_from_args(&cli);
        assert!(config.demo_only && config.plot);
        assert_eq!(config.plot_width, 40);
        assert_eq!(config.plot_height, 25);
        assert_eq!(config.export, Some(PathBuf::from("t.csv")));
    }
}
