//! The data pipeline shared by every front-end:
//! FRED fetch -> quarter alignment -> derived metrics, with demo fallback.
//!
//! Fallback policy lives here and nowhere else:
//! - a series that fails is already a placeholder by the time we see it
//! - a fetch that fails as a whole, or leaves no usable quarters, is replaced
//!   by the demo table

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::data::{FetchOutcome, FredClient, SeriesSource, align, derive, fetch_all, generate_demo};
use crate::domain::{DataOrigin, DerivedTable, FetchWindow, RunConfig};
use crate::error::AppError;

/// The final table plus where it came from.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub table: DerivedTable,
    pub origin: DataOrigin,
}

/// Run the full pipeline against FRED for the window ending `today`.
pub fn run_pipeline(config: &RunConfig, today: NaiveDate) -> Result<PipelineOutput, AppError> {
    if config.demo_only {
        return demo_output("requested on the command line");
    }

    let window = FetchWindow::ending(today);
    let outcome = match FredClient::from_env() {
        Ok(client) => fetch_all(&client, &window),
        Err(err) => FetchOutcome::failed(&window, err),
    };
    build_from_outcome(outcome)
}

/// Run the pipeline against any series source.
pub fn run_with_source<S: SeriesSource>(
    source: &S,
    window: &FetchWindow,
) -> Result<PipelineOutput, AppError> {
    build_from_outcome(fetch_all(source, window))
}

/// Turn a fetch outcome into the final table, falling back to demo data when
/// nothing usable was retrieved.
pub fn build_from_outcome(outcome: FetchOutcome) -> Result<PipelineOutput, AppError> {
    let failed = outcome.failed_keys();
    let series = match outcome {
        FetchOutcome::Complete(series) => series,
        FetchOutcome::Partial { series, .. } => series,
        FetchOutcome::Failed { error: err, .. } => {
            warn!(error = %err, "error fetching FRED data; falling back to demonstration data");
            return demo_output(&err.to_string());
        }
    };

    let aligned = align(&series);
    let table = derive(&aligned);
    if table.is_empty() {
        warn!("no usable quarters in fetched data; falling back to demonstration data");
        return demo_output("no usable quarters in fetched data");
    }

    log_loaded("federal debt data loaded", &table);

    let origin = if failed.is_empty() {
        DataOrigin::Live
    } else {
        DataOrigin::LivePartial { failed }
    };
    Ok(PipelineOutput { table, origin })
}

fn demo_output(reason: &str) -> Result<PipelineOutput, AppError> {
    let table = generate_demo()?;
    log_loaded("demonstration data created", &table);
    Ok(PipelineOutput {
        table,
        origin: DataOrigin::Demo {
            reason: reason.to_string(),
        },
    })
}

fn log_loaded(message: &str, table: &DerivedTable) {
    let (Some(first), Some(last), Some(current)) =
        (table.first_date(), table.last_date(), table.current())
    else {
        return;
    };
    info!(
        from = %first.format("%Y-%m"),
        to = %last.format("%Y-%m"),
        quarters = table.len(),
        current_burden_pct = %format!("{:.2}", current.interest_burden_pct),
        "{message}"
    );
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::data::fetch::tests::StubSource;
    use crate::domain::SeriesKey;
    use crate::error::FetchError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window() -> FetchWindow {
        FetchWindow::new(date(2020, 1, 1), date(2021, 12, 31))
    }

    fn quarterly(level: f64) -> Vec<(NaiveDate, Option<f64>)> {
        window()
            .quarter_ends()
            .into_iter()
            .enumerate()
            .map(|(i, d)| (d, Some(level + i as f64)))
            .collect()
    }

    #[test]
    fn live_fetch_produces_live_table() {
        let data = SeriesKey::ALL
            .iter()
            .map(|k| (k.series_id(), quarterly(100.0 * (k.index() + 1) as f64)))
            .collect();
        let out = run_with_source(&StubSource { data }, &window()).unwrap();
        assert_eq!(out.origin, DataOrigin::Live);
        assert_eq!(out.table.len(), 8);
    }

    #[test]
    fn missing_gdp_keeps_rows_without_debt_to_gdp() {
        let data = SeriesKey::ALL
            .iter()
            .filter(|k| **k != SeriesKey::Gdp)
            .map(|k| (k.series_id(), quarterly(50.0)))
            .collect();
        let out = run_with_source(&StubSource { data }, &window()).unwrap();
        assert_eq!(
            out.origin,
            DataOrigin::LivePartial {
                failed: vec![SeriesKey::Gdp]
            }
        );
        assert_eq!(out.table.len(), 8);
        for r in &out.table.rows {
            assert_eq!(r.debt_to_gdp, None);
            assert!(r.interest_burden_pct.is_finite());
        }
    }

    #[test]
    fn unreachable_source_falls_back_to_demo() {
        let out = run_with_source(&StubSource { data: HashMap::new() }, &window()).unwrap();
        assert!(out.origin.is_demo());
        assert_eq!(out.table.len(), 139);
    }

    #[test]
    fn client_failure_falls_back_to_demo() {
        let outcome = FetchOutcome::failed(&window(), FetchError::Client("tls backend unavailable".to_string()));
        let out = build_from_outcome(outcome).unwrap();
        assert_eq!(
            out.origin,
            DataOrigin::Demo {
                reason: "failed to build HTTP client: tls backend unavailable".to_string()
            }
        );
    }

    #[test]
    fn no_usable_quarters_falls_back_to_demo() {
        // Only three series present: every row has three missing columns.
        let data = [SeriesKey::InterestPayments, SeriesKey::TotalReceipts, SeriesKey::TotalDebt]
            .iter()
            .map(|k| (k.series_id(), quarterly(10.0)))
            .collect();
        let out = run_with_source(&StubSource { data }, &window()).unwrap();
        assert!(out.origin.is_demo());
    }

    #[test]
    fn demo_flag_skips_the_network() {
        let config = RunConfig {
            demo_only: true,
            chart_path: None,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export: None,
        };
        let out = run_pipeline(&config, date(2025, 1, 1)).unwrap();
        assert!(out.origin.is_demo());
        assert_eq!(out.table, generate_demo().unwrap());
    }
}
