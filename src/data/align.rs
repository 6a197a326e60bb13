//! Quarter-end resampling and the six-column join.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::quarter::{quarter_end, quarter_end_of_ordinal, quarter_ordinal};
use crate::domain::{AlignedRow, AlignedTable, RawSeries, SeriesKey};

/// Rows need at least this many of the six columns present to be kept.
pub const MIN_PRESENT_COLUMNS: usize = 4;

/// Resample a series to quarter-end dates, keeping the last observation of
/// each quarter.
///
/// Missing observations never overwrite a present one. Quarters between the
/// first and last observation that have no value come out as `None`.
pub fn resample_quarterly(series: &RawSeries) -> BTreeMap<NaiveDate, Option<f64>> {
    let mut out = BTreeMap::new();
    let (Some(first), Some(last)) = (series.observations.first(), series.observations.last()) else {
        return out;
    };

    for ordinal in quarter_ordinal(first.0)..=quarter_ordinal(last.0) {
        out.insert(quarter_end_of_ordinal(ordinal), None);
    }

    let mut sorted: Vec<&(NaiveDate, Option<f64>)> = series.observations.iter().collect();
    sorted.sort_by_key(|(d, _)| *d);
    for (date, value) in sorted {
        if let Some(v) = value {
            out.insert(quarter_end(*date), Some(*v));
        }
    }
    out
}

/// Outer-join the resampled series on quarter-end date and drop sparse rows.
pub fn align(series: &[RawSeries]) -> AlignedTable {
    let mut joined: BTreeMap<NaiveDate, [Option<f64>; SeriesKey::COUNT]> = BTreeMap::new();

    for s in series {
        for (date, value) in resample_quarterly(s) {
            joined.entry(date).or_insert([None; SeriesKey::COUNT])[s.key.index()] = value;
        }
    }

    let total = joined.len();
    let rows: Vec<AlignedRow> = joined
        .into_iter()
        .map(|(date, values)| AlignedRow { date, values })
        .filter(|row| SeriesKey::COUNT - row.missing_count() >= MIN_PRESENT_COLUMNS)
        .collect();

    debug!(quarters = total, kept = rows.len(), "aligned series to quarter ends");
    AlignedTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FetchWindow;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(key: SeriesKey, obs: &[((i32, u32, u32), Option<f64>)]) -> RawSeries {
        RawSeries::new(
            key,
            obs.iter().map(|((y, m, d), v)| (date(*y, *m, *d), *v)).collect(),
        )
    }

    #[test]
    fn resample_takes_last_observation_in_quarter() {
        let s = series(
            SeriesKey::Treasury10y,
            &[
                ((2020, 1, 1), Some(1.8)),
                ((2020, 2, 1), Some(1.5)),
                ((2020, 3, 1), Some(0.9)),
                ((2020, 4, 1), Some(0.7)),
                ((2020, 5, 1), Some(0.6)),
                ((2020, 6, 1), None),
            ],
        );
        let q = resample_quarterly(&s);
        assert_eq!(q.len(), 2);
        assert_eq!(q[&date(2020, 3, 31)], Some(0.9));
        // A trailing missing value does not erase the last present one.
        assert_eq!(q[&date(2020, 6, 30)], Some(0.6));
    }

    #[test]
    fn resample_fills_gap_quarters_with_missing() {
        let s = series(
            SeriesKey::Gdp,
            &[((2020, 1, 1), Some(100.0)), ((2020, 10, 1), Some(110.0))],
        );
        let q = resample_quarterly(&s);
        let dates: Vec<NaiveDate> = q.keys().copied().collect();
        assert_eq!(
            dates,
            vec![date(2020, 3, 31), date(2020, 6, 30), date(2020, 9, 30), date(2020, 12, 31)]
        );
        assert_eq!(q[&date(2020, 6, 30)], None);
        assert_eq!(q[&date(2020, 12, 31)], Some(110.0));
    }

    #[test]
    fn resample_of_empty_series_is_empty() {
        let s = RawSeries::new(SeriesKey::Gdp, Vec::new());
        assert!(resample_quarterly(&s).is_empty());
    }

    #[test]
    fn align_outer_joins_and_drops_sparse_rows() {
        let quarterly = |key, vals: &[(u32, f64)]| {
            series(
                key,
                &vals.iter().map(|(m, v)| ((2021, *m, 1), Some(*v))).collect::<Vec<_>>(),
            )
        };
        let input = vec![
            quarterly(SeriesKey::InterestPayments, &[(1, 10.0), (4, 11.0), (7, 12.0)]),
            quarterly(SeriesKey::TotalReceipts, &[(1, 100.0), (4, 101.0), (7, 102.0)]),
            quarterly(SeriesKey::TotalDebt, &[(1, 50.0), (4, 51.0)]),
            quarterly(SeriesKey::Treasury10y, &[(1, 1.0), (4, 1.5)]),
            quarterly(SeriesKey::Gdp, &[(4, 500.0)]),
            quarterly(SeriesKey::Treasury3m, &[(1, 0.1)]),
        ];

        let table = align(&input);
        // Q1: 5 present, Q2: 5 present, Q3: 2 present -> dropped.
        let dates: Vec<NaiveDate> = table.rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(2021, 3, 31), date(2021, 6, 30)]);
        assert_eq!(table.rows[0].get(SeriesKey::Gdp), None);
        assert_eq!(table.rows[1].get(SeriesKey::Gdp), Some(500.0));
        assert!(table.rows.iter().all(|r| r.missing_count() <= 2));
    }

    #[test]
    fn align_keeps_rows_when_gdp_is_entirely_missing() {
        let window = FetchWindow::new(date(2022, 1, 1), date(2022, 12, 31));
        let present = |key| {
            series(
                key,
                &[((2022, 2, 1), Some(2.0)), ((2022, 5, 1), Some(3.0)), ((2022, 8, 1), Some(4.0))],
            )
        };
        let mut input: Vec<RawSeries> = SeriesKey::ALL
            .iter()
            .filter(|k| **k != SeriesKey::Gdp)
            .map(|k| present(*k))
            .collect();
        input.push(RawSeries::placeholder(SeriesKey::Gdp, &window));

        let table = align(&input);
        // Q4 exists only through the empty gdp placeholder, so it is dropped.
        assert_eq!(table.len(), 3);
        assert!(table.rows.iter().all(|r| r.get(SeriesKey::Gdp).is_none()));
        assert!(table.rows.iter().all(|r| r.missing_count() == 1));
    }

    #[test]
    fn align_drops_all_rows_when_gdp_plus_two_more_are_missing() {
        let window = FetchWindow::new(date(2022, 1, 1), date(2022, 12, 31));
        let mut input: Vec<RawSeries> = vec![
            series(SeriesKey::InterestPayments, &[((2022, 2, 1), Some(1.0))]),
            series(SeriesKey::TotalReceipts, &[((2022, 2, 1), Some(1.0))]),
            series(SeriesKey::TotalDebt, &[((2022, 2, 1), Some(1.0))]),
        ];
        input.push(RawSeries::placeholder(SeriesKey::Gdp, &window));
        input.push(RawSeries::placeholder(SeriesKey::Treasury10y, &window));
        input.push(RawSeries::placeholder(SeriesKey::Treasury3m, &window));

        assert!(align(&input).is_empty());
    }

    #[test]
    fn align_is_deterministic() {
        let input = vec![
            series(SeriesKey::InterestPayments, &[((2020, 1, 1), Some(1.0))]),
            series(SeriesKey::TotalReceipts, &[((2020, 1, 1), Some(2.0))]),
            series(SeriesKey::TotalDebt, &[((2020, 1, 1), Some(3.0))]),
            series(SeriesKey::Gdp, &[((2020, 1, 1), Some(4.0))]),
        ];
        assert_eq!(align(&input), align(&input));
    }
}
