//! Data acquisition and table construction.
//!
//! - `fred`: FRED HTTP client
//! - `fetch`: per-series fetch with placeholder substitution
//! - `align`: quarter-end resampling and the six-column join
//! - `metrics`: derived ratio columns
//! - `demo`: deterministic fallback table

pub mod align;
pub mod demo;
pub mod fetch;
pub mod fred;
pub mod metrics;

pub use align::align;
pub use demo::generate_demo;
pub use fetch::{FetchOutcome, SeriesSource, fetch_all};
pub use fred::FredClient;
pub use metrics::derive;
