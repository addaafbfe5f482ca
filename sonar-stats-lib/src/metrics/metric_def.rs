use super::MetricKind;

/// A metric requested from the server and rendered as one report column
#[derive(Debug)]
pub struct MetricDef {
    /// The server's metric key, also used as the CSV column name
    pub key: &'static str,

    /// Column heading in the table view
    pub title: &'static str,

    pub kind: MetricKind,

    /// Width of the column in the table view
    pub width: usize,
}

macro_rules! metric_def {
    ($key:expr, $title:expr, $kind:ident, $width:expr) => {
        MetricDef {
            key: $key,
            title: $title,
            kind: MetricKind::$kind,
            width: $width,
        }
    };
}

/// The metrics fetched for every project, in report column order.
pub const METRIC_CATALOG: &[MetricDef] = &[
    metric_def!("alert_status", "Quality Gate", QualityGate, 12),
    metric_def!("bugs", "Bugs", Count, 8),
    metric_def!("new_bugs", "New Bugs", Count, 8),
    metric_def!("vulnerabilities", "Vuln", Count, 8),
    metric_def!("new_vulnerabilities", "New Vuln", Count, 8),
    metric_def!("security_hotspots", "Hotspots", Count, 8),
    metric_def!("new_security_hotspots", "New Hotspots", Count, 12),
    metric_def!("code_smells", "Code Smells", Count, 11),
    metric_def!("new_code_smells", "New Smells", Count, 10),
    metric_def!("coverage", "Coverage", Percentage, 8),
    metric_def!("new_coverage", "New Coverage", Percentage, 12),
    metric_def!("duplicated_lines_density", "Duplication", Percentage, 11),
    metric_def!("new_duplicated_lines_density", "New Dupl", Percentage, 8),
    metric_def!("reliability_rating", "Reliability", Rating, 11),
    metric_def!("new_reliability_rating", "New Reliab", Rating, 10),
    metric_def!("security_rating", "Security", Rating, 8),
    metric_def!("new_security_rating", "New Security", Rating, 12),
    metric_def!("sqale_rating", "Maintainab", Rating, 10),
    metric_def!("new_maintainability_rating", "New Maint", Rating, 9),
    metric_def!("sqale_index", "Tech Debt", Duration, 9),
    metric_def!("new_technical_debt", "New Debt", Duration, 8),
    metric_def!("sqale_debt_ratio", "Debt Ratio", Percentage, 10),
    metric_def!("new_sqale_debt_ratio", "New Ratio", Percentage, 9),
    metric_def!("ncloc", "Lines", Count, 9),
    metric_def!("new_lines_to_cover", "New Lines", Count, 9),
];

/// Look up a catalog entry by metric key.
#[must_use]
pub fn find(key: &str) -> Option<&'static MetricDef> {
    METRIC_CATALOG.iter().find(|def| def.key == key)
}

/// The comma-separated list of catalog keys, as sent in the `metricKeys` request parameter.
#[must_use]
pub fn metric_keys_param() -> String {
    METRIC_CATALOG.iter().map(|def| def.key).collect::<Vec<_>>().join(",")
}
