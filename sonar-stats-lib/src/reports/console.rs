use super::{ProjectReport, common};
use crate::Result;
use crate::metrics::{METRIC_CATALOG, MetricKind};
use core::fmt::Write;
use owo_colors::OwoColorize;

/// Width of the leading project name column.
pub const PROJECT_COLUMN_WIDTH: usize = 30;

const PROJECT_COLUMN_TITLE: &str = "Project";

/// Render an aligned table with one row per project.
///
/// Each cell is truncated to its column width and padded so the columns line up. The last
/// column is not padded to avoid trailing whitespace.
pub fn generate<W: Write>(reports: &[ProjectReport], use_colors: bool, writer: &mut W) -> Result<()> {
    let total_width = PROJECT_COLUMN_WIDTH + METRIC_CATALOG.iter().map(|def| def.width + 1).sum::<usize>();
    let rule = "=".repeat(total_width);

    writeln!(writer, "{rule}")?;

    let mut header = pad(PROJECT_COLUMN_TITLE, PROJECT_COLUMN_WIDTH, false);
    for (index, def) in METRIC_CATALOG.iter().enumerate() {
        header.push(' ');
        header.push_str(&pad(def.title, def.width, index + 1 == METRIC_CATALOG.len()));
    }

    if use_colors {
        writeln!(writer, "{}", header.bold())?;
    } else {
        writeln!(writer, "{header}")?;
    }

    writeln!(writer, "{rule}")?;

    for report in reports {
        write!(writer, "{}", pad(report.project.name(), PROJECT_COLUMN_WIDTH, false))?;

        for (index, def) in METRIC_CATALOG.iter().enumerate() {
            let raw = report.metrics.get(def.key);
            let cell = pad(&common::format_table_value(def, raw), def.width, index + 1 == METRIC_CATALOG.len());

            if use_colors && def.kind == MetricKind::QualityGate {
                write!(writer, " {}", colorize_gate(raw, &cell))?;
            } else {
                write!(writer, " {cell}")?;
            }
        }

        writeln!(writer)?;
    }

    writeln!(writer, "{rule}")?;
    writeln!(writer, "{} project(s)", reports.len())?;

    Ok(())
}

/// Truncate `text` to `width` and, unless it is the last column, pad it with spaces.
fn pad(text: &str, width: usize, last: bool) -> String {
    let text = common::truncate(text, width);
    if last {
        text.into_owned()
    } else {
        format!("{text:<width$}")
    }
}

fn colorize_gate(status: Option<&str>, cell: &str) -> String {
    match common::format_quality_gate(status) {
        "PASSED" => cell.green().to_string(),
        "FAILED" => cell.red().bold().to_string(),
        "WARNING" => cell.yellow().to_string(),
        _ => cell.to_string(),
    }
}
