//! Export the final table to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one row per quarter, missing values as empty cells.

use std::path::Path;

use csv::Writer;

use crate::domain::DerivedTable;
use crate::error::AppError;

/// Column order of the export (matches `DerivedRow` field order).
pub const EXPORT_COLUMNS: [&str; 10] = [
    "date",
    "interest_payments",
    "total_receipts",
    "total_debt",
    "treasury_10y",
    "gdp",
    "treasury_3m",
    "interest_burden_pct",
    "debt_to_gdp",
    "implied_avg_rate",
];

/// Write the derived table to a CSV file.
pub fn write_table_csv(path: &Path, table: &DerivedTable) -> Result<(), AppError> {
    let mut writer = Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    if table.is_empty() {
        writer
            .write_record(EXPORT_COLUMNS)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;
    }

    for row in &table.rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;

    Ok(())
}
