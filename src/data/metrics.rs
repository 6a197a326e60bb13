//! Derived ratio metrics.
//!
//! Every ratio goes through `ratio`: a missing operand, a zero denominator or a
//! non-finite result gives `None` rather than an error or a sentinel.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{AlignedTable, DerivedRow, DerivedTable, SeriesKey};

/// `numerator / denominator * scale`, or `None` if it cannot be computed.
pub fn ratio(numerator: Option<f64>, denominator: Option<f64>, scale: f64) -> Option<f64> {
    let (n, d) = (numerator?, denominator?);
    if d == 0.0 {
        return None;
    }
    let v = n / d * scale;
    v.is_finite().then_some(v)
}

pub fn interest_burden_pct(interest_payments: Option<f64>, total_receipts: Option<f64>) -> Option<f64> {
    ratio(interest_payments, total_receipts, 100.0)
}

pub fn debt_to_gdp(total_debt: Option<f64>, gdp: Option<f64>) -> Option<f64> {
    ratio(total_debt, gdp, 100.0)
}

/// Quarterly interest annualized (x4) against the debt stock, in percent.
pub fn implied_avg_rate(interest_payments: Option<f64>, total_debt: Option<f64>) -> Option<f64> {
    ratio(interest_payments.map(|v| v * 4.0), total_debt, 100.0)
}

/// Build a final row from the six raw values.
///
/// Returns `None` when the row would lack `interest_burden_pct`, `total_debt`
/// or `total_receipts`.
pub fn derive_row(date: NaiveDate, values: &[Option<f64>; SeriesKey::COUNT]) -> Option<DerivedRow> {
    let get = |key: SeriesKey| values[key.index()];

    let interest_payments = get(SeriesKey::InterestPayments);
    let total_receipts = get(SeriesKey::TotalReceipts);
    let total_debt = get(SeriesKey::TotalDebt);
    let gdp = get(SeriesKey::Gdp);

    let burden = interest_burden_pct(interest_payments, total_receipts)?;

    Some(DerivedRow {
        date,
        interest_payments,
        total_receipts: total_receipts?,
        total_debt: total_debt?,
        treasury_10y: get(SeriesKey::Treasury10y),
        gdp,
        treasury_3m: get(SeriesKey::Treasury3m),
        interest_burden_pct: burden,
        debt_to_gdp: debt_to_gdp(total_debt, gdp),
        implied_avg_rate: implied_avg_rate(interest_payments, total_debt),
    })
}

/// Compute the derived columns and drop rows missing the guaranteed fields.
pub fn derive(aligned: &AlignedTable) -> DerivedTable {
    let rows: Vec<DerivedRow> = aligned
        .rows
        .iter()
        .filter_map(|row| derive_row(row.date, &row.values))
        .collect();

    debug!(aligned = aligned.len(), derived = rows.len(), "derived burden metrics");
    DerivedTable { rows }
}
