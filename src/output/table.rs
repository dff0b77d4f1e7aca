//! Human-readable table output.
//!
//! MDE is shown as a percentage with two decimals; sizes and days carry
//! thousands separators.

use crate::plan::MetricRequirements;
use crate::sample_size::types::ResultRow;

const COLUMNS: [&str; 5] = ["MDE", "Control", "Per variant", "Total", "Days"];

/// 1234567 -> "1,234,567"
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_mde(mde: f64) -> String {
    format!("{:.2}%", mde * 100.0)
}

fn cells(row: &ResultRow) -> [String; 5] {
    [
        format_mde(row.mde),
        format_thousands(row.control_size),
        format_thousands(row.variant_size),
        format_thousands(row.total_size),
        format_thousands(row.duration_days),
    ]
}

/// Right-aligned table with a header and a rule
pub fn render_table(rows: &[ResultRow]) -> String {
    let body: Vec<[String; 5]> = rows.iter().map(cells).collect();

    let mut widths = COLUMNS.map(str::len);
    for line in &body {
        for (width, cell) in widths.iter_mut().zip(line.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut output = String::new();
    let header: Vec<String> = COLUMNS
        .iter()
        .zip(widths.iter())
        .map(|(name, width)| format!("{:>width$}", name, width = width))
        .collect();
    output.push_str(&header.join("  "));
    output.push('\n');
    let total_width = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    output.push_str(&"-".repeat(total_width));
    output.push('\n');

    for line in &body {
        let formatted: Vec<String> = line
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:>width$}", cell, width = width))
            .collect();
        output.push_str(&formatted.join("  "));
        output.push('\n');
    }
    output
}

/// One titled table per metric
pub fn render_plan_table(results: &[MetricRequirements]) -> String {
    let mut output = String::new();
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!("Metric: {}\n", result.name));
        output.push_str(&render_table(&result.rows));
    }
    output
}
