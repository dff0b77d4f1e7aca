use serde::{Deserialize, Serialize};

/// Requirements for one swept MDE value
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub mde: f64,
    pub control_size: u64,
    /// Size of each treatment group
    pub variant_size: u64,
    pub total_size: u64,
    pub duration_days: u64,
}
