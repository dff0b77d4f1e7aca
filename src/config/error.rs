//----------------------------------------
// config errors
//----------------------------------------
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigErr {
    #[error("baseline must be finite; got {0}")]
    BaselineNotFinite(f64),
    #[error("proportion baseline must be in (0, 1); got {0}")]
    BaselineOutOfRange(f64),
    #[error("baseline must be non-zero when the MDE is relative to it")]
    ZeroBaseline,
    #[error("variance must be finite and >= 0; got {0}")]
    NegativeVariance(f64),
    #[error("variance is required for mean metrics")]
    MissingVariance,
    #[error("mde_start ({start}) must not exceed mde_end ({end})")]
    EmptyMdeRange { start: f64, end: f64 },
    #[error("mde_start, mde_end and mde_step must be finite; got {start}, {end}, {step}")]
    MdeNotFinite { start: f64, end: f64, step: f64 },
    #[error("mde_start must be at least {min}; got {start}")]
    MdeStartTooSmall { start: f64, min: f64 },
    #[error("mde_step must be > 0; got {0}")]
    NonPositiveMdeStep(f64),
    #[error("mde_step must be at least {min}; got {step}")]
    MdeStepTooSmall { step: f64, min: f64 },
    #[error("MDE sweep has {len} values; at most {max} are allowed")]
    SweepTooLong { len: usize, max: usize },
    #[error("sample size or duration at mde {mde} is too large to represent")]
    SampleSizeOverflow { mde: f64 },
    #[error("target rate {target} at mde {mde} falls outside (0, 1)")]
    TargetRateOutOfRange { mde: f64, target: f64 },
    #[error("allocation ratio k must be > 0; got {0}")]
    NonPositiveRatio(f64),
    #[error("num_variants must be >= 1")]
    NoVariants,
    #[error("daily_traffic must be > 0")]
    NoTraffic,
    #[error("traffic_fraction must be in (0, 1]; got {0}")]
    TrafficFractionOutOfRange(f64),
    #[error("alpha must be in (0, 1); got {0}")]
    AlphaOutOfRange(f64),
    #[error("power must be in (0, 1); got {0}")]
    PowerOutOfRange(f64),
    #[error("plan must contain at least one metric")]
    NoMetrics,
}

#[derive(Error, Debug)]
pub enum ConfigFileErr {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}
