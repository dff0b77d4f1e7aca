//----------------------------------------
// normal distribution errors
//----------------------------------------
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalDistErr {
    #[error("arguments to quantile function should be in (0, 1); got {0}")]
    QuantileOutOfBounds(f64),
    #[error("failed to construct standard normal distribution")]
    Construction,
}
