//----------------------------------------
// output errors
//----------------------------------------
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputErr {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}
