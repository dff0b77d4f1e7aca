use crate::config::error::ConfigErr;
use crate::config::types::{ExperimentConfig, MDE_DECIMALS};
use crate::error::AbcomputeErr;
use crate::sample_size::compute_ss::{
    ceil_count, control_sample_size, variant_sample_size, z_sum_squared,
};
use crate::sample_size::types::ResultRow;

fn round_to_decimals(x: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}

/// MDE values of the inclusive sweep mde_start..=mde_end, ascending.
/// Values are generated as start + i * step (not accumulated) and rounded
/// to `MDE_DECIMALS` places.
pub fn mde_grid(config: &ExperimentConfig) -> Vec<f64> {
    (0..config.sweep_len())
        .map(|i| round_to_decimals(config.mde_start + i as f64 * config.mde_step, MDE_DECIMALS))
        .collect()
}

/// Days needed to collect `total_size` subjects from the experiment's
/// share of daily traffic. `None` when the day count does not fit in a `u64`.
pub fn duration_days(total_size: u64, daily_traffic: u64, traffic_fraction: f64) -> Option<u64> {
    ceil_count(total_size as f64 / (daily_traffic as f64 * traffic_fraction))
}

/// Computes control, per-variant and total sample sizes plus duration for
/// every MDE in the configured sweep. The config is validated first; no
/// rows are produced for an invalid config, nor when any size or duration
/// of the sweep does not fit in a `u64`.
pub fn compute(config: &ExperimentConfig) -> Result<Vec<ResultRow>, AbcomputeErr> {
    config.validate()?;

    //----------------------------------------
    // Critical values are shared by all rows
    //----------------------------------------
    let z_sq = z_sum_squared(config.alpha, config.power, config.hypothesis)?;

    tracing::debug!(
        metric_kind = ?config.metric_kind,
        baseline = config.baseline,
        variance = config.variance,
        mde_mode = ?config.mde_mode,
        hypothesis = ?config.hypothesis,
        z_sq,
        n_rows = config.sweep_len(),
        "computing sample size sweep"
    );

    //----------------------------------------
    // Sweep
    //----------------------------------------
    mde_grid(config)
        .into_iter()
        .map(|mde| -> Result<ResultRow, AbcomputeErr> {
            let overflow = move || ConfigErr::SampleSizeOverflow { mde };
            let control_size = control_sample_size(config, mde, z_sq)?;
            let variant_size =
                variant_sample_size(control_size, config.k).ok_or_else(overflow)?;
            let total_size = u64::from(config.num_variants)
                .checked_mul(variant_size)
                .and_then(|variants| variants.checked_add(control_size))
                .ok_or_else(overflow)?;
            let row = ResultRow {
                mde,
                control_size,
                variant_size,
                total_size,
                duration_days: duration_days(
                    total_size,
                    config.daily_traffic,
                    config.traffic_fraction,
                )
                .ok_or_else(overflow)?,
            };
            tracing::trace!(?row, "computed row");
            Ok(row)
        })
        .collect()
}
