//! Shared domain types.
//!
//! The pipeline moves through three table shapes:
//!
//! - `RawSeries`: one FRED series as fetched (dated, possibly missing values)
//! - `AlignedTable`: all six series on a common quarter-end index
//! - `DerivedTable`: aligned values plus the burden/debt/rate ratios
//!
//! Missing values are `Option<f64>` end to end. `DerivedRow` makes the columns
//! the pipeline guarantees (`interest_burden_pct`, `total_debt`,
//! `total_receipts`) plain `f64`.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::quarter;

/// The six logical series the analysis is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesKey {
    InterestPayments,
    TotalReceipts,
    TotalDebt,
    Treasury10y,
    Gdp,
    Treasury3m,
}

impl SeriesKey {
    pub const COUNT: usize = 6;

    pub const ALL: [SeriesKey; Self::COUNT] = [
        SeriesKey::InterestPayments,
        SeriesKey::TotalReceipts,
        SeriesKey::TotalDebt,
        SeriesKey::Treasury10y,
        SeriesKey::Gdp,
        SeriesKey::Treasury3m,
    ];

    /// FRED series identifier.
    pub fn series_id(self) -> &'static str {
        match self {
            SeriesKey::InterestPayments => "A091RC1Q027SBEA",
            SeriesKey::TotalReceipts => "FGRECPT",
            SeriesKey::TotalDebt => "GFDEGDQ188S",
            SeriesKey::Treasury10y => "GS10",
            SeriesKey::Gdp => "GDP",
            SeriesKey::Treasury3m => "GS3M",
        }
    }

    /// Column name used in tables, logs and exports.
    pub fn column_name(self) -> &'static str {
        match self {
            SeriesKey::InterestPayments => "interest_payments",
            SeriesKey::TotalReceipts => "total_receipts",
            SeriesKey::TotalDebt => "total_debt",
            SeriesKey::Treasury10y => "treasury_10y",
            SeriesKey::Gdp => "gdp",
            SeriesKey::Treasury3m => "treasury_3m",
        }
    }

    /// Position of this series in a row's value array.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Observation window used for every fetch.
///
/// The start is fixed at 1990-01-01; the end is the run date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FetchWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The analysis window: 1990-01-01 through `end`.
    pub fn ending(end: NaiveDate) -> Self {
        Self::new(quarter::analysis_start(), end)
    }

    /// Every calendar quarter-end date inside the window (inclusive).
    pub fn quarter_ends(&self) -> Vec<NaiveDate> {
        quarter::quarter_ends_between(self.start, self.end)
    }
}

/// One fetched (or placeholder) series.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeries {
    pub key: SeriesKey,
    /// Observations in ascending date order. `None` marks a missing value.
    pub observations: Vec<(NaiveDate, Option<f64>)>,
}

impl RawSeries {
    pub fn new(key: SeriesKey, mut observations: Vec<(NaiveDate, Option<f64>)>) -> Self {
        observations.sort_by_key(|(d, _)| *d);
        Self { key, observations }
    }

    /// All-missing stand-in for a series that could not be fetched.
    ///
    /// Covers the window at quarterly granularity so it lines up with the
    /// resampled output of a successful fetch.
    pub fn placeholder(key: SeriesKey, window: &FetchWindow) -> Self {
        let observations = window.quarter_ends().into_iter().map(|d| (d, None)).collect();
        Self { key, observations }
    }

    pub fn is_all_missing(&self) -> bool {
        self.observations.iter().all(|(_, v)| v.is_none())
    }
}

/// One quarter of the aligned table.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow {
    /// Quarter-end date.
    pub date: NaiveDate,
    pub values: [Option<f64>; SeriesKey::COUNT],
}

impl AlignedRow {
    pub fn get(&self, key: SeriesKey) -> Option<f64> {
        self.values[key.index()]
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }
}

/// All six series joined on quarter-end date (ascending, unique).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedTable {
    pub rows: Vec<AlignedRow>,
}

impl AlignedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One quarter of the final table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedRow {
    pub date: NaiveDate,

    pub interest_payments: Option<f64>,
    pub total_receipts: f64,
    pub total_debt: f64,
    pub treasury_10y: Option<f64>,
    pub gdp: Option<f64>,
    pub treasury_3m: Option<f64>,

    /// Interest payments as % of receipts.
    pub interest_burden_pct: f64,
    /// Total debt as % of GDP.
    pub debt_to_gdp: Option<f64>,
    /// Quarterly interest annualized against the debt stock, in %.
    pub implied_avg_rate: Option<f64>,
}

/// The pipeline's terminal artifact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedTable {
    pub rows: Vec<DerivedRow>,
}

impl DerivedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Most recent row (the chart's annotated "current point").
    pub fn current(&self) -> Option<&DerivedRow> {
        self.rows.last()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    /// `(date, interest_burden_pct)` pairs in date order.
    pub fn burden_series(&self) -> Vec<(NaiveDate, f64)> {
        self.rows.iter().map(|r| (r.date, r.interest_burden_pct)).collect()
    }
}

/// Where the final table came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOrigin {
    /// All six series fetched.
    Live,
    /// Fetched, but some series were replaced by all-missing placeholders.
    LivePartial { failed: Vec<SeriesKey> },
    /// Synthetic table from the demo generator.
    Demo { reason: String },
}

impl DataOrigin {
    pub fn is_demo(&self) -> bool {
        matches!(self, DataOrigin::Demo { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            DataOrigin::Live => "FRED (all series)".to_string(),
            DataOrigin::LivePartial { failed } => {
                let names: Vec<&str> = failed.iter().map(|k| k.column_name()).collect();
                format!("FRED (missing: {})", names.join(", "))
            }
            DataOrigin::Demo { reason } => format!("demonstration data ({reason})"),
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Skip the network and go straight to the demo generator.
    pub demo_only: bool,
    /// SVG output path; `None` disables the chart.
    pub chart_path: Option<PathBuf>,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export: Option<PathBuf>,
}
