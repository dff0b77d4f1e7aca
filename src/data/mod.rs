//! Input provider for baseline statistics.
//!
//! Reads historical metric values from CSV and summarizes the first column
//! into the baseline (mean) and variance that seed an experiment config.

mod csv;
pub mod error;

pub use csv::{MetricSummary, baseline_from_reader, load_baseline_csv};
