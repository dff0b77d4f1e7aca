//----------------------------------------
// Crate error type
//----------------------------------------
pub use crate::config::error::{ConfigErr, ConfigFileErr};
pub use crate::data::error::DataErr;
pub use crate::normal::error::NormalDistErr;
pub use crate::output::error::OutputErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AbcomputeErr {
    #[error("invalid experiment config: {0}")]
    InvalidConfig(ConfigErr),
    #[error("while loading config file: {0}")]
    ConfigFile(ConfigFileErr),
    #[error("while evaluating normal distribution: {0}")]
    NormalDist(NormalDistErr),
    #[error("while reading baseline data: {0}")]
    Data(DataErr),
    #[error("while writing results: {0}")]
    Output(OutputErr),
}

impl AbcomputeErr {
    /// True when the error came from experiment config validation
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, AbcomputeErr::InvalidConfig(_))
    }
}

impl From<ConfigErr> for AbcomputeErr {
    fn from(e: ConfigErr) -> Self {
        AbcomputeErr::InvalidConfig(e)
    }
}

impl From<ConfigFileErr> for AbcomputeErr {
    fn from(e: ConfigFileErr) -> Self {
        AbcomputeErr::ConfigFile(e)
    }
}

impl From<NormalDistErr> for AbcomputeErr {
    fn from(e: NormalDistErr) -> Self {
        AbcomputeErr::NormalDist(e)
    }
}

impl From<DataErr> for AbcomputeErr {
    fn from(e: DataErr) -> Self {
        AbcomputeErr::Data(e)
    }
}

impl From<OutputErr> for AbcomputeErr {
    fn from(e: OutputErr) -> Self {
        AbcomputeErr::Output(e)
    }
}
