//----------------------------------------
// Root lib
//----------------------------------------
//! Sample size planning for A/B experiments.
//!
//! Given a baseline and variance for a metric, a significance level, power,
//! allocation ratio and traffic figures, computes the control and per-variant
//! sample sizes and the experiment duration needed to detect each minimum
//! detectable effect (MDE) in a sweep. Proportions (conversion rates) and
//! means (revenue per user) are supported, with MDE relative to the baseline
//! by default.
//!
//! ```
//! use abcompute::compute::{ExperimentConfig, MetricKind, compute};
//!
//! let config = ExperimentConfig::builder(MetricKind::Proportion, 0.1)
//!     .mde_range(0.05, 0.05, 0.01)
//!     .traffic(10_000, 0.5)
//!     .build()
//!     .unwrap();
//! let rows = compute(&config).unwrap();
//! assert_eq!(rows[0].control_size, 57760);
//! assert_eq!(rows[0].duration_days, 24);
//! ```

/// This module houses the public API: configs, the sweep computation,
/// baseline loading, plans and output formats
pub mod compute;
mod config;
mod data;
/// This module contains error types
pub mod error;
mod hypothesis_type;
mod normal;
mod output;
mod plan;
mod sample_size;

pub use error::AbcomputeErr;
