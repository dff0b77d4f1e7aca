use crate::error::AbcomputeErr;
use crate::normal::error::NormalDistErr;
use statrs::distribution::{ContinuousCDF, Normal};

fn std_normal() -> Result<Normal, AbcomputeErr> {
    Normal::new(0.0, 1.0).map_err(|_| NormalDistErr::Construction.into())
}

/// Inverse cdf of the standard normal. The endpoints 0 and 1 map to
/// infinities, so only the open interval is accepted.
pub fn std_normal_quantile(p: f64) -> Result<f64, AbcomputeErr> {
    if !(p > 0.0 && p < 1.0) {
        return Err(NormalDistErr::QuantileOutOfBounds(p).into());
    }
    Ok(std_normal()?.inverse_cdf(p))
}
