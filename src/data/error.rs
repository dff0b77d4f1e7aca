//----------------------------------------
// data errors
//----------------------------------------
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataErr {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no numeric values found in the first column")]
    NoNumericValues,
    #[error("need at least 2 numeric values to estimate variance; got {0}")]
    InsufficientValues(usize),
}
