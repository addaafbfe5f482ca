use strum::Display;

/// How the raw value of a metric is interpreted when rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum MetricKind {
    /// `OK`, `WARN` or `ERROR`
    QualityGate,

    /// A plain count (bugs, lines, ...)
    Count,

    /// A decimal percentage such as `87.456`
    Percentage,

    /// A rating from `1.0` (A) to `5.0` (E)
    Rating,

    /// An effort expressed in minutes
    Duration,
}

impl MetricKind {
    /// The table cell shown when a metric of this kind has no value.
    #[must_use]
    pub const fn table_default(self) -> &'static str {
        match self {
            Self::QualityGate => "UNKNOWN",
            Self::Count => "0",
            Self::Percentage | Self::Rating | Self::Duration => "N/A",
        }
    }
}
