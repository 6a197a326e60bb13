//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the fixed series catalogue (`SeriesKey`) and fetch window (`FetchWindow`)
//! - the three table shapes (`RawSeries`, `AlignedTable`, `DerivedTable`)
//! - run configuration (`RunConfig`) and data provenance (`DataOrigin`)

pub mod quarter;
pub mod types;

pub use types::*;
