//! Deterministic demonstration data.
//!
//! Used when live acquisition fails so the chart and report still have a
//! realistic table to work with. The shape follows the real series loosely:
//! debt compounds faster than receipts, the 10y rate cycles twice over the
//! window, and interest payments follow the rate applied to the debt stock.

use std::f64::consts::PI;

use chrono::NaiveDate;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::metrics::derive_row;
use crate::domain::{DerivedTable, FetchWindow};
use crate::error::AppError;

/// Fixed seed so every run produces the same table.
pub const DEMO_SEED: u64 = 42;

const BASE_RECEIPTS: f64 = 800.0;
const RECEIPTS_GROWTH_MEAN: f64 = 1.02;
const RECEIPTS_GROWTH_SD: f64 = 0.05;

const BASE_DEBT: f64 = 3000.0;
const DEBT_GROWTH_MEAN: f64 = 1.025;
const DEBT_GROWTH_SD: f64 = 0.03;

const TREASURY_LEVEL: f64 = 4.0;
const TREASURY_AMPLITUDE: f64 = 2.0;
const TREASURY_CYCLES: f64 = 2.0;
const TREASURY_NOISE_SD: f64 = 0.5;
const TREASURY_FLOOR: f64 = 0.1;

const DEBT_RATE_BETA: f64 = 0.8;
const DEBT_RATE_NOISE_SD: f64 = 0.3;
const DEBT_RATE_FLOOR: f64 = 0.5;

/// Receipts-to-GDP multiplier (no independent GDP noise).
const GDP_MULTIPLIER: f64 = 5.2;

/// Window the demo table spans: quarter ends from 1990-Q1 to 2024-Q3.
pub fn demo_window() -> FetchWindow {
    let end = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap_or(NaiveDate::MAX);
    FetchWindow::ending(end)
}

/// Generate the demo table with the fixed seed.
pub fn generate_demo() -> Result<DerivedTable, AppError> {
    generate_demo_with_seed(DEMO_SEED)
}

/// Generate a demo table.
///
/// Random draws happen in a fixed order: all receipts growth factors, then
/// all debt growth factors, then treasury noise, then debt-rate noise.
pub fn generate_demo_with_seed(seed: u64) -> Result<DerivedTable, AppError> {
    let dates = demo_window().quarter_ends();
    let n = dates.len();

    let mut rng = StdRng::seed_from_u64(seed);

    let receipts_growth = draw(&mut rng, normal(RECEIPTS_GROWTH_MEAN, RECEIPTS_GROWTH_SD)?, n);
    let debt_growth = draw(&mut rng, normal(DEBT_GROWTH_MEAN, DEBT_GROWTH_SD)?, n);
    let treasury_noise = draw(&mut rng, normal(0.0, TREASURY_NOISE_SD)?, n);
    let rate_noise = draw(&mut rng, normal(0.0, DEBT_RATE_NOISE_SD)?, n);

    let total_receipts = compound(BASE_RECEIPTS, &receipts_growth);
    let total_debt = compound(BASE_DEBT, &debt_growth);

    let treasury_10y: Vec<f64> = (0..n)
        .map(|i| {
            let cycle = (TREASURY_CYCLES * 2.0 * PI * linspace_unit(i, n)).sin();
            (cycle * TREASURY_AMPLITUDE + TREASURY_LEVEL + treasury_noise[i]).max(TREASURY_FLOOR)
        })
        .collect();

    let rows = (0..n)
        .filter_map(|i| {
            let avg_debt_rate = (treasury_10y[i] * DEBT_RATE_BETA + rate_noise[i]).max(DEBT_RATE_FLOOR);
            // Annual % rate on the debt stock -> quarterly flow.
            let interest_payments = total_debt[i] * avg_debt_rate / 400.0;
            let gdp = total_receipts[i] * GDP_MULTIPLIER;

            let values = [
                Some(interest_payments),
                Some(total_receipts[i]),
                Some(total_debt[i]),
                Some(treasury_10y[i]),
                Some(gdp),
                None,
            ];
            derive_row(dates[i], &values)
        })
        .collect();

    Ok(DerivedTable { rows })
}

fn normal(mean: f64, sd: f64) -> Result<Normal<f64>, AppError> {
    Normal::new(mean, sd).map_err(|e| AppError::new(4, format!("Demo distribution error: {e}")))
}

fn draw(rng: &mut StdRng, dist: Normal<f64>, n: usize) -> Vec<f64> {
    (0..n).map(|_| dist.sample(rng)).collect()
}

/// Multiplicative walk from `base`; the first factor is ignored so the first
/// value is exactly `base`.
fn compound(base: f64, factors: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(factors.len());
    let mut level = base;
    for (i, factor) in factors.iter().enumerate() {
        if i > 0 {
            level *= factor;
        }
        out.push(level);
    }
    out
}

/// Position of sample `i` on `[0, 1]` for `n` evenly spaced samples.
fn linspace_unit(i: usize, n: usize) -> f64 {
    if n < 2 { 0.0 } else { i as f64 / (n - 1) as f64 }
}
