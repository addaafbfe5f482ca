use super::ProjectReport;
use super::common::{escape_csv, format_quality_gate};
use crate::Result;
use crate::metrics::{METRIC_CATALOG, MetricKind};
use core::fmt::Write;

/// Value written for metrics that were not reported.
const MISSING_VALUE: &str = "0";

pub fn generate<W: Write>(reports: &[ProjectReport], writer: &mut W) -> Result<()> {
    // Write header row
    write!(writer, "ProjectKey,ProjectName")?;
    for def in METRIC_CATALOG {
        write!(writer, ",{}", escape_csv(def.key))?;
    }
    writeln!(writer)?;

    for report in reports {
        write!(writer, "{},{}", escape_csv(report.project.key()), escape_csv(report.project.name()))?;

        for def in METRIC_CATALOG {
            let raw = report.metrics.get(def.key);
            let value = if def.kind == MetricKind::QualityGate {
                format_quality_gate(raw)
            } else {
                raw.unwrap_or(MISSING_VALUE)
            };

            write!(writer, ",{}", escape_csv(value))?;
        }

        writeln!(writer)?;
    }

    Ok(())
}
