//! Calendar-quarter date arithmetic.

use chrono::{Datelike, NaiveDate};

/// First day of the analysis window.
pub fn analysis_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Quarter ordinal (`year * 4 + quarter0`), monotone in date.
pub fn quarter_ordinal(date: NaiveDate) -> i32 {
    date.year() * 4 + (date.month0() / 3) as i32
}

/// Last calendar day of the quarter with the given ordinal.
pub fn quarter_end_of_ordinal(ordinal: i32) -> NaiveDate {
    let year = ordinal.div_euclid(4);
    let q0 = ordinal.rem_euclid(4) as u32;
    // Quarter-end days are fixed: Mar 31, Jun 30, Sep 30, Dec 31.
    let (month, day) = match q0 {
        0 => (3, 31),
        1 => (6, 30),
        2 => (9, 30),
        _ => (12, 31),
    };
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MAX)
}

/// Quarter-end date of the quarter containing `date`.
pub fn quarter_end(date: NaiveDate) -> NaiveDate {
    quarter_end_of_ordinal(quarter_ordinal(date))
}

/// Every quarter-end `q` with `start <= q <= end`, ascending.
pub fn quarter_ends_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if end < start {
        return Vec::new();
    }
    (quarter_ordinal(start)..=quarter_ordinal(end))
        .map(quarter_end_of_ordinal)
        .filter(|q| *q >= start && *q <= end)
        .collect()
}

/// Fractional year, used as a continuous chart axis.
pub fn fractional_year(date: NaiveDate) -> f64 {
    let days_in_year = if NaiveDate::from_ymd_opt(date.year(), 2, 29).is_some() {
        366.0
    } else {
        365.0
    };
    date.year() as f64 + (date.ordinal0() as f64) / days_in_year
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn quarter_end_maps_each_month() {
        assert_eq!(quarter_end(date(2020, 1, 15)), date(2020, 3, 31));
        assert_eq!(quarter_end(date(2020, 3, 31)), date(2020, 3, 31));
        assert_eq!(quarter_end(date(2020, 4, 1)), date(2020, 6, 30));
        assert_eq!(quarter_end(date(2020, 8, 31)), date(2020, 9, 30));
        assert_eq!(quarter_end(date(2020, 11, 1)), date(2020, 12, 31));
    }

    #[test]
    fn demo_window_has_139_quarters() {
        let ends = quarter_ends_between(date(1990, 1, 1), date(2024, 10, 1));
        assert_eq!(ends.len(), 139);
        assert_eq!(ends.first().copied(), Some(date(1990, 3, 31)));
        assert_eq!(ends.last().copied(), Some(date(2024, 9, 30)));
    }

    #[test]
    fn quarter_ends_are_inclusive_of_end() {
        let ends = quarter_ends_between(date(2023, 12, 31), date(2024, 3, 31));
        assert_eq!(ends, vec![date(2023, 12, 31), date(2024, 3, 31)]);
        assert!(quarter_ends_between(date(2024, 1, 1), date(2023, 1, 1)).is_empty());
    }

    #[test]
    fn fractional_year_is_monotone() {
        let a = fractional_year(date(2020, 3, 31));
        let b = fractional_year(date(2020, 6, 30));
        assert!(a > 2020.0 && a < b && b < 2021.0);
        assert_eq!(fractional_year(date(2021, 1, 1)), 2021.0);
    }
}
