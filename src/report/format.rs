//! Burden statistics and the terminal summary.
//!
//! Only the `interest_burden_pct` column is read here. Formatting lives in one
//! place so output changes stay localized.

use chrono::{Datelike, NaiveDate};

use crate::domain::{DataOrigin, DerivedTable};

/// Risk classification of the current interest burden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    Critical,
    HighRisk,
    Moderate,
    Manageable,
}

impl RiskTier {
    /// Classify a burden percentage. Boundaries are strict: 20.0 is `HighRisk`.
    pub fn classify(burden_pct: f64) -> Self {
        if burden_pct > 20.0 {
            RiskTier::Critical
        } else if burden_pct > 15.0 {
            RiskTier::HighRisk
        } else if burden_pct > 10.0 {
            RiskTier::Moderate
        } else {
            RiskTier::Manageable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Critical => "CRITICAL",
            RiskTier::HighRisk => "HIGH RISK",
            RiskTier::Moderate => "MODERATE",
            RiskTier::Manageable => "MANAGEABLE",
        }
    }
}

/// Current / peak / average burden over the table.
#[derive(Debug, Clone, PartialEq)]
pub struct BurdenSummary {
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub quarters: usize,
    /// Whole calendar years between first and last quarter (at least 1).
    pub span_years: i32,
    pub current: f64,
    pub peak: f64,
    pub average: f64,
    pub tier: RiskTier,
}

impl BurdenSummary {
    /// Current burden as a percentage of the historical peak.
    pub fn current_vs_peak_pct(&self) -> Option<f64> {
        (self.peak != 0.0).then(|| self.current / self.peak * 100.0)
    }
}

/// Summarize the burden column; `None` for an empty table.
pub fn summarize(table: &DerivedTable) -> Option<BurdenSummary> {
    let first = table.rows.first()?;
    let last = table.rows.last()?;

    let burden = table.rows.iter().map(|r| r.interest_burden_pct);
    let peak = burden.clone().fold(f64::NEG_INFINITY, f64::max);
    let average = burden.sum::<f64>() / table.len() as f64;

    Some(BurdenSummary {
        first_date: first.date,
        last_date: last.date,
        quarters: table.len(),
        span_years: (last.date.year() - first.date.year()).max(1),
        current: last.interest_burden_pct,
        peak,
        average,
        tier: RiskTier::classify(last.interest_burden_pct),
    })
}

/// Format the end-of-run analysis summary.
pub fn format_summary(table: &DerivedTable, origin: &DataOrigin, analysis_date: NaiveDate) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();

    out.push_str(&format!("{rule}\n"));
    out.push_str("Federal Interest Expense Burden\n");
    out.push_str(&format!("Analysis date: {}\n", analysis_date.format("%Y-%m-%d")));
    out.push_str(&format!("{rule}\n"));

    let Some(s) = summarize(table) else {
        out.push_str("No data available.\n");
        return out;
    };

    out.push_str("\nDataset:\n");
    out.push_str(&format!("  Source: {}\n", origin.describe()));
    out.push_str(&format!(
        "  Period: {} to {}\n",
        s.first_date.format("%Y-%m"),
        s.last_date.format("%Y-%m")
    ));
    out.push_str(&format!("  Quarters: {}\n", s.quarters));

    out.push_str("\nKey findings:\n");
    out.push_str(&format!("  Current interest burden: {:.2}% of federal revenue\n", s.current));
    out.push_str(&format!("  Peak interest burden:    {:.2}% (historical maximum)\n", s.peak));
    out.push_str(&format!(
        "  Average interest burden: {:.2}% ({}-year average)\n",
        s.average, s.span_years
    ));
    if let Some(pct) = s.current_vs_peak_pct() {
        out.push_str(&format!("  Current vs peak:         {pct:.1}% of historical peak\n"));
    }

    out.push_str(&format!("\nRisk assessment: {} ({:.1}%)\n", s.tier.label(), s.current));
    out.push_str(&format!("{rule}\n"));

    out
}
