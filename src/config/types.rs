//----------------------------------------
// config mod types
//----------------------------------------
use serde::{Deserialize, Serialize};

use crate::config::error::ConfigErr;
use crate::error::AbcomputeErr;
use crate::hypothesis_type::HypothesisType;

/// Sweep values are rounded to this many decimal places
pub const MDE_DECIMALS: i32 = 6;
/// Smallest step (and smallest MDE) that survives rounding to `MDE_DECIMALS`
pub const MIN_MDE_STEP: f64 = 1e-6;
/// Upper bound on the number of swept MDE values
pub const MAX_SWEEP_LEN: usize = 100_000;
/// Slack applied before flooring the number of sweep steps, so that ranges
/// like 0.001..=0.01 by 0.001 keep their last value
pub const SWEEP_TOL: f64 = 1e-9;

#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    /// Binary outcome, e.g. a conversion rate
    #[default]
    Proportion,
    /// Continuous outcome, e.g. revenue per user
    Mean,
}

impl std::str::FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "proportion" | "binary" => Ok(MetricKind::Proportion),
            "mean" | "continuous" => Ok(MetricKind::Mean),
            other => Err(format!("unknown metric kind: {}", other)),
        }
    }
}

/// How a swept MDE value translates into an absolute effect
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MdeMode {
    /// target = baseline * (1 + mde)
    #[default]
    Relative,
    /// target = baseline + mde
    Absolute,
}

impl MdeMode {
    pub fn effect(self, baseline: f64, mde: f64) -> f64 {
        match self {
            MdeMode::Relative => baseline * mde,
            MdeMode::Absolute => mde,
        }
    }
}

impl std::str::FromStr for MdeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "relative" => Ok(MdeMode::Relative),
            "absolute" => Ok(MdeMode::Absolute),
            other => Err(format!("unknown MDE mode: {}", other)),
        }
    }
}

/// Settings shared by every metric of an experiment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignSettings {
    #[serde(default = "default_mde_start")]
    pub mde_start: f64,
    #[serde(default = "default_mde_end")]
    pub mde_end: f64,
    #[serde(default = "default_mde_step")]
    pub mde_step: f64,
    #[serde(default = "default_k")]
    pub k: f64,
    #[serde(default = "default_num_variants")]
    pub num_variants: u32,
    #[serde(default = "default_daily_traffic")]
    pub daily_traffic: u64,
    #[serde(default = "default_traffic_fraction")]
    pub traffic_fraction: f64,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_power")]
    pub power: f64,
    #[serde(default)]
    pub mde_mode: MdeMode,
    #[serde(default)]
    pub hypothesis: HypothesisType,
}

fn default_mde_start() -> f64 {
    0.001
}
fn default_mde_end() -> f64 {
    0.01
}
fn default_mde_step() -> f64 {
    0.001
}
fn default_k() -> f64 {
    1.0
}
fn default_num_variants() -> u32 {
    1
}
fn default_daily_traffic() -> u64 {
    10_000
}
fn default_traffic_fraction() -> f64 {
    0.5
}
fn default_alpha() -> f64 {
    0.05
}
fn default_power() -> f64 {
    0.8
}

impl Default for DesignSettings {
    fn default() -> Self {
        Self {
            mde_start: default_mde_start(),
            mde_end: default_mde_end(),
            mde_step: default_mde_step(),
            k: default_k(),
            num_variants: default_num_variants(),
            daily_traffic: default_daily_traffic(),
            traffic_fraction: default_traffic_fraction(),
            alpha: default_alpha(),
            power: default_power(),
            mde_mode: MdeMode::default(),
            hypothesis: HypothesisType::default(),
        }
    }
}

/// Fully resolved input of one sample size calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperimentConfig {
    pub metric_kind: MetricKind,
    pub baseline: f64,
    pub variance: f64,
    pub mde_start: f64,
    pub mde_end: f64,
    pub mde_step: f64,
    pub k: f64,
    pub num_variants: u32,
    pub daily_traffic: u64,
    pub traffic_fraction: f64,
    pub alpha: f64,
    pub power: f64,
    pub mde_mode: MdeMode,
    pub hypothesis: HypothesisType,
}

impl ExperimentConfig {
    /// Starts a builder seeded with `DesignSettings::default()`
    pub fn builder(metric_kind: MetricKind, baseline: f64) -> ExperimentConfigBuilder {
        ExperimentConfigBuilder {
            metric_kind,
            baseline,
            variance: None,
            design: DesignSettings::default(),
        }
    }

    /// Number of MDE values in the sweep, before any cap is applied.
    /// Saturates at `usize::MAX` for ranges too long to count.
    pub fn sweep_len(&self) -> usize {
        let steps = ((self.mde_end - self.mde_start) / self.mde_step + SWEEP_TOL).floor();
        // float -> int casts saturate; NaN becomes 0
        (steps as usize).saturating_add(1)
    }

    /// Checks every constraint the calculation relies on; the first
    /// violation is reported
    pub fn validate(&self) -> Result<(), AbcomputeErr> {
        //----------------------------------------
        // Metric
        if !self.baseline.is_finite() {
            return Err(ConfigErr::BaselineNotFinite(self.baseline).into());
        }
        if !(self.variance.is_finite() && self.variance >= 0.0) {
            return Err(ConfigErr::NegativeVariance(self.variance).into());
        }

        //----------------------------------------
        // MDE sweep
        if !(self.mde_start.is_finite() && self.mde_end.is_finite() && self.mde_step.is_finite())
        {
            return Err(ConfigErr::MdeNotFinite {
                start: self.mde_start,
                end: self.mde_end,
                step: self.mde_step,
            }
            .into());
        }
        if !(self.mde_step > 0.0) {
            return Err(ConfigErr::NonPositiveMdeStep(self.mde_step).into());
        }
        if self.mde_step < MIN_MDE_STEP {
            return Err(ConfigErr::MdeStepTooSmall {
                step: self.mde_step,
                min: MIN_MDE_STEP,
            }
            .into());
        }
        // Smaller starts would round to a zero effect
        if !(self.mde_start >= MIN_MDE_STEP) {
            return Err(ConfigErr::MdeStartTooSmall {
                start: self.mde_start,
                min: MIN_MDE_STEP,
            }
            .into());
        }
        if !(self.mde_start <= self.mde_end) {
            return Err(ConfigErr::EmptyMdeRange {
                start: self.mde_start,
                end: self.mde_end,
            }
            .into());
        }
        let len = self.sweep_len();
        if len > MAX_SWEEP_LEN {
            return Err(ConfigErr::SweepTooLong {
                len,
                max: MAX_SWEEP_LEN,
            }
            .into());
        }

        //----------------------------------------
        // Effect must be non-degenerate across the sweep
        match self.metric_kind {
            MetricKind::Proportion => {
                if !(self.baseline > 0.0 && self.baseline < 1.0) {
                    return Err(ConfigErr::BaselineOutOfRange(self.baseline).into());
                }
                // Target grows with mde, so the end of the range is the binding case
                let target = self.baseline + self.mde_mode.effect(self.baseline, self.mde_end);
                if !(target > 0.0 && target < 1.0) {
                    return Err(ConfigErr::TargetRateOutOfRange {
                        mde: self.mde_end,
                        target,
                    }
                    .into());
                }
            }
            MetricKind::Mean => {
                if self.mde_mode == MdeMode::Relative && self.baseline == 0.0 {
                    return Err(ConfigErr::ZeroBaseline.into());
                }
            }
        }

        //----------------------------------------
        // Allocation + traffic
        if !(self.k > 0.0 && self.k.is_finite()) {
            return Err(ConfigErr::NonPositiveRatio(self.k).into());
        }
        if self.num_variants == 0 {
            return Err(ConfigErr::NoVariants.into());
        }
        if self.daily_traffic == 0 {
            return Err(ConfigErr::NoTraffic.into());
        }
        if !(self.traffic_fraction > 0.0 && self.traffic_fraction <= 1.0) {
            return Err(ConfigErr::TrafficFractionOutOfRange(self.traffic_fraction).into());
        }

        //----------------------------------------
        // Test parameters
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigErr::AlphaOutOfRange(self.alpha).into());
        }
        if !(self.power > 0.0 && self.power < 1.0) {
            return Err(ConfigErr::PowerOutOfRange(self.power).into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ExperimentConfigBuilder {
    metric_kind: MetricKind,
    baseline: f64,
    variance: Option<f64>,
    design: DesignSettings,
}

impl ExperimentConfigBuilder {
    /// Control group variance. Proportions fall back to
    /// `baseline * (1 - baseline)` when this is never set.
    pub fn variance(mut self, variance: f64) -> Self {
        self.variance = Some(variance);
        self
    }

    pub fn maybe_variance(mut self, maybe_variance: Option<f64>) -> Self {
        self.variance = maybe_variance;
        self
    }

    pub fn design(mut self, design: DesignSettings) -> Self {
        self.design = design;
        self
    }

    pub fn mde_range(mut self, start: f64, end: f64, step: f64) -> Self {
        self.design.mde_start = start;
        self.design.mde_end = end;
        self.design.mde_step = step;
        self
    }

    pub fn allocation_ratio(mut self, k: f64) -> Self {
        self.design.k = k;
        self
    }

    pub fn num_variants(mut self, num_variants: u32) -> Self {
        self.design.num_variants = num_variants;
        self
    }

    pub fn traffic(mut self, daily_traffic: u64, traffic_fraction: f64) -> Self {
        self.design.daily_traffic = daily_traffic;
        self.design.traffic_fraction = traffic_fraction;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.design.alpha = alpha;
        self
    }

    pub fn power(mut self, power: f64) -> Self {
        self.design.power = power;
        self
    }

    pub fn mde_mode(mut self, mde_mode: MdeMode) -> Self {
        self.design.mde_mode = mde_mode;
        self
    }

    pub fn hypothesis(mut self, hypothesis: HypothesisType) -> Self {
        self.design.hypothesis = hypothesis;
        self
    }

    pub fn build(self) -> Result<ExperimentConfig, AbcomputeErr> {
        let variance = match (self.variance, self.metric_kind) {
            (Some(variance), _) => variance,
            (None, MetricKind::Proportion) => self.baseline * (1. - self.baseline),
            (None, MetricKind::Mean) => return Err(ConfigErr::MissingVariance.into()),
        };
        let DesignSettings {
            mde_start,
            mde_end,
            mde_step,
            k,
            num_variants,
            daily_traffic,
            traffic_fraction,
            alpha,
            power,
            mde_mode,
            hypothesis,
        } = self.design;

        let config = ExperimentConfig {
            metric_kind: self.metric_kind,
            baseline: self.baseline,
            variance,
            mde_start,
            mde_end,
            mde_step,
            k,
            num_variants,
            daily_traffic,
            traffic_fraction,
            alpha,
            power,
            mde_mode,
            hypothesis,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proportion() -> ExperimentConfigBuilder {
        ExperimentConfig::builder(MetricKind::Proportion, 0.1)
    }

    #[test]
    fn proportion_variance_is_derived() {
        let config = proportion().build().expect("failed to build config");
        assert!((config.variance - 0.09).abs() < 1e-12);
    }

    #[test]
    fn explicit_variance_wins() {
        let config = proportion().variance(0.2).build().expect("failed to build config");
        assert_eq!(config.variance, 0.2);
    }

    #[test]
    fn mean_requires_variance() {
        let err = ExperimentConfig::builder(MetricKind::Mean, 25.0)
            .build()
            .unwrap_err();
        assert_eq!(
            format!("{}", err),
            "invalid experiment config: variance is required for mean metrics"
        );
    }

    #[test]
    fn defaults_match_design_settings() {
        let config = proportion().build().expect("failed to build config");
        let design = DesignSettings::default();
        assert_eq!(config.mde_start, design.mde_start);
        assert_eq!(config.mde_end, design.mde_end);
        assert_eq!(config.k, 1.0);
        assert_eq!(config.num_variants, 1);
        assert_eq!(config.hypothesis, HypothesisType::NotEqual);
        assert_eq!(config.mde_mode, MdeMode::Relative);
    }

    #[test]
    fn sweep_len_keeps_last_value() {
        let config = proportion().mde_range(0.001, 0.01, 0.001).build().unwrap();
        assert_eq!(config.sweep_len(), 10);
        let config = proportion().mde_range(0.05, 0.05, 0.01).build().unwrap();
        assert_eq!(config.sweep_len(), 1);
        let config = proportion().mde_range(0.01, 0.055, 0.01).build().unwrap();
        assert_eq!(config.sweep_len(), 5);
    }

    #[test]
    fn negative_variance_error() {
        let err = proportion().variance(-1.0).build().unwrap_err();
        assert!(err.is_invalid_config());
        assert_eq!(
            format!("{}", err),
            "invalid experiment config: variance must be finite and >= 0; got -1"
        );
    }

    #[test]
    fn reversed_range_error() {
        let err = proportion().mde_range(0.05, 0.01, 0.01).build().unwrap_err();
        assert_eq!(
            format!("{}", err),
            "invalid experiment config: mde_start (0.05) must not exceed mde_end (0.01)"
        );
    }

    #[test]
    fn step_errors() {
        let err = proportion().mde_range(0.01, 0.05, 0.0).build().unwrap_err();
        assert!(matches!(
            err,
            AbcomputeErr::InvalidConfig(ConfigErr::NonPositiveMdeStep(_))
        ));
        let err = proportion().mde_range(0.01, 0.05, -0.01).build().unwrap_err();
        assert!(matches!(
            err,
            AbcomputeErr::InvalidConfig(ConfigErr::NonPositiveMdeStep(_))
        ));
        let err = proportion().mde_range(0.01, 0.05, 1e-9).build().unwrap_err();
        assert!(matches!(
            err,
            AbcomputeErr::InvalidConfig(ConfigErr::MdeStepTooSmall { .. })
        ));
    }

    #[test]
    fn zero_mde_error() {
        let err = proportion().mde_range(0.0, 0.05, 0.01).build().unwrap_err();
        assert!(matches!(
            err,
            AbcomputeErr::InvalidConfig(ConfigErr::MdeStartTooSmall { .. })
        ));
    }

    #[test]
    fn mde_start_below_rounding_error() {
        // 4e-7 would round to a zero MDE in the grid
        let err = proportion().mde_range(4e-7, 0.001, 0.0001).build().unwrap_err();
        assert_eq!(
            format!("{}", err),
            "invalid experiment config: mde_start must be at least 0.000001; got 0.0000004"
        );
        proportion()
            .mde_range(MIN_MDE_STEP, 0.001, 0.0001)
            .build()
            .expect("smallest representable mde_start should be accepted");
    }

    #[test]
    fn non_finite_sweep_error() {
        let mean = || ExperimentConfig::builder(MetricKind::Mean, 10.0).variance(4.0);
        for (start, end, step) in [
            (0.01, f64::INFINITY, 0.01),
            (f64::NAN, 0.05, 0.01),
            (0.01, 0.05, f64::INFINITY),
        ] {
            let err = mean().mde_range(start, end, step).build().unwrap_err();
            assert!(matches!(
                err,
                AbcomputeErr::InvalidConfig(ConfigErr::MdeNotFinite { .. })
            ));
        }
    }

    #[test]
    fn huge_sweep_end_error() {
        let err = ExperimentConfig::builder(MetricKind::Mean, 10.0)
            .variance(4.0)
            .mde_range(0.01, 1e30, 1.0)
            .mde_mode(MdeMode::Absolute)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            AbcomputeErr::InvalidConfig(ConfigErr::SweepTooLong { .. })
        ));
    }

    #[test]
    fn sweep_len_saturates() {
        let mut config = proportion().build().unwrap();
        config.mde_end = 1e300;
        config.mde_step = 1e-6;
        assert_eq!(config.sweep_len(), usize::MAX);
    }

    #[test]
    fn sweep_too_long_error() {
        let err = proportion().mde_range(0.000001, 0.9, 0.000001).build().unwrap_err();
        assert!(matches!(
            err,
            AbcomputeErr::InvalidConfig(ConfigErr::SweepTooLong { .. })
        ));
    }

    #[test]
    fn proportion_range_errors() {
        let err = ExperimentConfig::builder(MetricKind::Proportion, 1.2)
            .variance(0.1)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            AbcomputeErr::InvalidConfig(ConfigErr::BaselineOutOfRange(_))
        ));

        // 0.6 * (1 + 0.8) = 1.08
        let err = ExperimentConfig::builder(MetricKind::Proportion, 0.6)
            .mde_range(0.1, 0.8, 0.1)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            AbcomputeErr::InvalidConfig(ConfigErr::TargetRateOutOfRange { .. })
        ));

        let err = ExperimentConfig::builder(MetricKind::Proportion, 0.6)
            .mde_range(0.1, 0.4, 0.1)
            .mde_mode(MdeMode::Absolute)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            AbcomputeErr::InvalidConfig(ConfigErr::TargetRateOutOfRange { .. })
        ));
    }

    #[test]
    fn zero_mean_baseline() {
        let err = ExperimentConfig::builder(MetricKind::Mean, 0.0)
            .variance(4.0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            AbcomputeErr::InvalidConfig(ConfigErr::ZeroBaseline)
        ));

        // Absolute effects don't depend on the baseline
        ExperimentConfig::builder(MetricKind::Mean, 0.0)
            .variance(4.0)
            .mde_mode(MdeMode::Absolute)
            .build()
            .expect("absolute mde should allow zero baseline");
    }

    #[test]
    fn traffic_and_allocation_errors() {
        let err = proportion().traffic(0, 0.5).build().unwrap_err();
        assert!(matches!(err, AbcomputeErr::InvalidConfig(ConfigErr::NoTraffic)));
        let err = proportion().traffic(100, 0.0).build().unwrap_err();
        assert!(matches!(
            err,
            AbcomputeErr::InvalidConfig(ConfigErr::TrafficFractionOutOfRange(_))
        ));
        let err = proportion().traffic(100, 1.5).build().unwrap_err();
        assert!(matches!(
            err,
            AbcomputeErr::InvalidConfig(ConfigErr::TrafficFractionOutOfRange(_))
        ));
        proportion()
            .traffic(100, 1.0)
            .build()
            .expect("full traffic should be accepted");
        let err = proportion().allocation_ratio(0.0).build().unwrap_err();
        assert!(matches!(
            err,
            AbcomputeErr::InvalidConfig(ConfigErr::NonPositiveRatio(_))
        ));
        let err = proportion().num_variants(0).build().unwrap_err();
        assert!(matches!(err, AbcomputeErr::InvalidConfig(ConfigErr::NoVariants)));
    }

    #[test]
    fn alpha_power_errors() {
        for alpha in [0.0, 1.0, -0.1, 1.5] {
            let err = proportion().alpha(alpha).build().unwrap_err();
            assert!(matches!(
                err,
                AbcomputeErr::InvalidConfig(ConfigErr::AlphaOutOfRange(_))
            ));
        }
        for power in [0.0, 1.0] {
            let err = proportion().power(power).build().unwrap_err();
            assert!(matches!(
                err,
                AbcomputeErr::InvalidConfig(ConfigErr::PowerOutOfRange(_))
            ));
        }
    }

    #[test]
    fn design_settings_from_toml_defaults() {
        let design: DesignSettings = toml::from_str(
            r#"
            mde_start = 0.02
            mde_end = 0.1
            mde_step = 0.02
            hypothesis = "trt-greater"
            mde_mode = "absolute"
            "#,
        )
        .expect("failed to parse design settings");
        assert_eq!(design.mde_start, 0.02);
        assert_eq!(design.alpha, 0.05);
        assert_eq!(design.daily_traffic, 10_000);
        assert_eq!(design.hypothesis, HypothesisType::TrtGreater);
        assert_eq!(design.mde_mode, MdeMode::Absolute);
    }

    #[test]
    fn parse_metric_kind() {
        assert_eq!("Proportion".parse(), Ok(MetricKind::Proportion));
        assert_eq!("mean".parse(), Ok(MetricKind::Mean));
        assert!("ratio".parse::<MetricKind>().is_err());
    }
}
