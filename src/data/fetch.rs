//! Per-series acquisition with failure isolation.
//!
//! `fetch_all` asks a `SeriesSource` for each of the six series. A series that
//! fails is replaced by an all-missing placeholder so the rest of the pipeline
//! still sees six columns; only a source that fails for every series (or cannot
//! be built at all) is reported as `FetchOutcome::Failed`, which still carries
//! the six placeholders.

use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::domain::{FetchWindow, RawSeries, SeriesKey};
use crate::error::FetchError;

/// Something that can return the observations of one series over a window.
pub trait SeriesSource: Sync {
    fn name(&self) -> &'static str;

    fn fetch(
        &self,
        series_id: &str,
        window: &FetchWindow,
    ) -> Result<Vec<(NaiveDate, Option<f64>)>, FetchError>;
}

/// Result of fetching all six series.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Every series fetched.
    Complete(Vec<RawSeries>),
    /// Some series failed and were replaced by placeholders.
    Partial {
        series: Vec<RawSeries>,
        failures: Vec<(SeriesKey, FetchError)>,
    },
    /// Nothing usable; the caller should fall back to demo data. The six
    /// placeholders are still returned.
    Failed {
        series: Vec<RawSeries>,
        error: FetchError,
    },
}

impl FetchOutcome {
    /// Total failure before any series was requested (e.g. no HTTP client).
    pub fn failed(window: &FetchWindow, error: FetchError) -> Self {
        let series = SeriesKey::ALL
            .iter()
            .map(|&key| RawSeries::placeholder(key, window))
            .collect();
        FetchOutcome::Failed { series, error }
    }

    /// The six series, placeholders included, in `SeriesKey::ALL` order.
    pub fn series(&self) -> &[RawSeries] {
        match self {
            FetchOutcome::Complete(series)
            | FetchOutcome::Partial { series, .. }
            | FetchOutcome::Failed { series, .. } => series,
        }
    }

    pub fn failed_keys(&self) -> Vec<SeriesKey> {
        match self {
            FetchOutcome::Complete(_) => Vec::new(),
            FetchOutcome::Partial { failures, .. } => failures.iter().map(|(k, _)| *k).collect(),
            FetchOutcome::Failed { .. } => SeriesKey::ALL.to_vec(),
        }
    }
}

/// Fetch all six series, isolating failures per series.
///
/// Series are requested in parallel; the returned list is always in
/// `SeriesKey::ALL` order.
pub fn fetch_all<S: SeriesSource>(source: &S, window: &FetchWindow) -> FetchOutcome {
    info!(
        source = source.name(),
        start = %window.start,
        end = %window.end,
        "downloading {} series",
        SeriesKey::ALL.len()
    );

    let results: Vec<(SeriesKey, Result<RawSeries, FetchError>)> = SeriesKey::ALL
        .par_iter()
        .map(|&key| (key, fetch_one(source, key, window)))
        .collect();

    let mut series = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (key, result) in results {
        match result {
            Ok(s) => series.push(s),
            Err(err) => {
                warn!(series = key.column_name(), error = %err, "could not fetch series; using placeholder");
                series.push(RawSeries::placeholder(key, window));
                failures.push((key, err));
            }
        }
    }

    if failures.is_empty() {
        info!("all series downloaded");
        FetchOutcome::Complete(series)
    } else if failures.len() == SeriesKey::ALL.len() {
        let first = failures
            .first()
            .map(|(_, e)| e.to_string())
            .unwrap_or_default();
        FetchOutcome::Failed {
            series,
            error: FetchError::Unreachable(format!("every series failed (first error: {first})")),
        }
    } else {
        FetchOutcome::Partial { series, failures }
    }
}

fn fetch_one<S: SeriesSource>(
    source: &S,
    key: SeriesKey,
    window: &FetchWindow,
) -> Result<RawSeries, FetchError> {
    info!(series = key.column_name(), id = key.series_id(), "fetching");
    let observations = source.fetch(key.series_id(), window)?;
    Ok(RawSeries::new(key, observations))
}
