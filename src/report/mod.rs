//! Reporting utilities: burden statistics, risk tiers, and formatted output.

pub mod format;

pub use format::*;
