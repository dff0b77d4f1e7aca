use crate::config::error::ConfigErr;
use crate::config::types::{ExperimentConfig, MetricKind};
use crate::error::AbcomputeErr;
use crate::hypothesis_type::HypothesisType;
use crate::normal::std_normal::std_normal_quantile;

/// Squared sum of the critical value and the power quantile,
/// (z_alpha + z_beta)^2, shared by every row of a sweep
pub fn z_sum_squared(
    alpha: f64,
    power: f64,
    hypothesis: HypothesisType,
) -> Result<f64, AbcomputeErr> {
    let z_alpha = std_normal_quantile(hypothesis.critical_probability(alpha))?;
    let z_beta = std_normal_quantile(power)?;
    Ok((z_alpha + z_beta).powi(2))
}

/// Unrounded control group size for a difference in means.
/// Both arms share `variance`; the treatment arm is `k` times the control arm.
pub fn mean_control_size(variance: f64, delta: f64, k: f64, z_sq: f64) -> f64 {
    (variance + variance / k) * z_sq / delta.powi(2)
}

/// Unrounded control group size for a difference in proportions, using
/// unpooled variances: the control variance as given and the Bernoulli
/// variance of the target rate for the treatment arm
pub fn proportion_control_size(
    control_variance: f64,
    target: f64,
    delta: f64,
    k: f64,
    z_sq: f64,
) -> f64 {
    let treatment_variance = target * (1. - target);
    (control_variance + treatment_variance / k) * z_sq / delta.powi(2)
}

/// Rounds up to a whole count. `None` when the value is not finite or does
/// not fit in a `u64`.
pub fn ceil_count(x: f64) -> Option<u64> {
    let x = x.ceil();
    // u64::MAX as f64 is 2^64, one past the largest count
    if x.is_finite() && x >= 0. && x < u64::MAX as f64 {
        Some(x as u64)
    } else {
        None
    }
}

/// Control group size needed to detect `mde`, rounded up
pub fn control_sample_size(
    config: &ExperimentConfig,
    mde: f64,
    z_sq: f64,
) -> Result<u64, AbcomputeErr> {
    let delta = config.mde_mode.effect(config.baseline, mde);
    let n = match config.metric_kind {
        MetricKind::Mean => mean_control_size(config.variance, delta, config.k, z_sq),
        MetricKind::Proportion => proportion_control_size(
            config.variance,
            config.baseline + delta,
            delta,
            config.k,
            z_sq,
        ),
    };
    Ok(ceil_count(n).ok_or(ConfigErr::SampleSizeOverflow { mde })?)
}

/// Size of each treatment group given the control group size; never
/// rounded down
pub fn variant_sample_size(control_size: u64, k: f64) -> Option<u64> {
    ceil_count(control_size as f64 * k)
}
