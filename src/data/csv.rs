use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::data::error::DataErr;
use crate::error::AbcomputeErr;

/// Mean and sample variance of a metric column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    pub mean: f64,
    /// Sample variance (n - 1 denominator)
    pub variance: f64,
    pub n: usize,
}

/// Summarize the first column of a CSV file.
///
/// The first line is treated as a header. Cells that don't parse as a
/// finite number are skipped.
pub fn load_baseline_csv(path: &Path) -> Result<MetricSummary, AbcomputeErr> {
    let file = File::open(path).map_err(DataErr::Io)?;
    let summary = baseline_from_reader(BufReader::new(file))?;
    tracing::info!(
        path = %path.display(),
        mean = summary.mean,
        variance = summary.variance,
        n = summary.n,
        "derived baseline from CSV"
    );
    Ok(summary)
}

/// Same as `load_baseline_csv` for any buffered reader
pub fn baseline_from_reader<R: BufRead>(reader: R) -> Result<MetricSummary, AbcomputeErr> {
    let mut values = Vec::new();
    let mut skipped = 0usize;

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(DataErr::Io)?;

        // Header
        if line_num == 0 {
            continue;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_first_field(line) {
            Some(value) => values.push(value),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "skipped non-numeric cells in first column");
    }
    if values.is_empty() {
        return Err(DataErr::NoNumericValues.into());
    }
    if values.len() < 2 {
        return Err(DataErr::InsufficientValues(values.len()).into());
    }

    Ok(MetricSummary {
        mean: values.iter().mean(),
        variance: values.iter().variance(),
        n: values.len(),
    })
}

fn parse_first_field(line: &str) -> Option<f64> {
    let field = line.split(',').next()?.trim();
    let field = field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field)
        .trim();
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}
