//! Result consumers: CSV export, JSON export and a terminal table.

mod csv;
pub mod error;
mod json;
mod table;

pub use csv::{write_csv, write_plan_csv};
pub use json::to_json;
pub use table::{format_thousands, render_plan_table, render_table};

use crate::error::AbcomputeErr;
use crate::plan::MetricRequirements;
use crate::sample_size::types::ResultRow;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned, human-readable table
    #[default]
    Table,
    /// Comma-separated values with a header row
    Csv,
    /// Pretty-printed JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "human" | "text" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// Render one sweep in the requested format
pub fn render(format: OutputFormat, rows: &[ResultRow]) -> Result<String, AbcomputeErr> {
    match format {
        OutputFormat::Table => Ok(render_table(rows)),
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            write_csv(rows, &mut buf)?;
            Ok(String::from_utf8_lossy(&buf).into_owned())
        }
        OutputFormat::Json => to_json(rows),
    }
}

/// Render the results of a multi-metric plan in the requested format
pub fn render_plan(
    format: OutputFormat,
    results: &[MetricRequirements],
) -> Result<String, AbcomputeErr> {
    match format {
        OutputFormat::Table => Ok(render_plan_table(results)),
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            write_plan_csv(results, &mut buf)?;
            Ok(String::from_utf8_lossy(&buf).into_owned())
        }
        OutputFormat::Json => to_json(results),
    }
}
