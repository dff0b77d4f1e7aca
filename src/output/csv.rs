use std::io::Write;

use crate::error::AbcomputeErr;
use crate::output::error::OutputErr;
use crate::plan::MetricRequirements;
use crate::sample_size::types::ResultRow;

const HEADER: &str = "mde,control_size,variant_size,total_size,duration_days";

fn write_row<W: Write>(writer: &mut W, row: &ResultRow) -> std::io::Result<()> {
    write!(
        writer,
        "{},{},{},{},{}",
        row.mde, row.control_size, row.variant_size, row.total_size, row.duration_days
    )
}

/// Quote a field if it contains a delimiter, quote or newline
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Write a sweep as CSV: header row, then one line per row
pub fn write_csv<W: Write>(rows: &[ResultRow], mut writer: W) -> Result<(), AbcomputeErr> {
    writeln!(writer, "{}", HEADER).map_err(OutputErr::Io)?;
    for row in rows {
        write_row(&mut writer, row).map_err(OutputErr::Io)?;
        writeln!(writer).map_err(OutputErr::Io)?;
    }
    writer.flush().map_err(OutputErr::Io)?;
    Ok(())
}

/// Write plan results as CSV with a leading `metric_name` column
pub fn write_plan_csv<W: Write>(
    results: &[MetricRequirements],
    mut writer: W,
) -> Result<(), AbcomputeErr> {
    writeln!(writer, "metric_name,{}", HEADER).map_err(OutputErr::Io)?;
    for result in results {
        let name = escape_field(&result.name);
        for row in &result.rows {
            write!(writer, "{},", name).map_err(OutputErr::Io)?;
            write_row(&mut writer, row).map_err(OutputErr::Io)?;
            writeln!(writer).map_err(OutputErr::Io)?;
        }
    }
    writer.flush().map_err(OutputErr::Io)?;
    Ok(())
}
