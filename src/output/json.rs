use serde::Serialize;

use crate::error::AbcomputeErr;
use crate::output::error::OutputErr;

/// Pretty-printed JSON for rows, plan results or summaries
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AbcomputeErr> {
    Ok(serde_json::to_string_pretty(value).map_err(OutputErr::Json)?)
}
