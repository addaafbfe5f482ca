//! The fixed set of metrics requested for every project
//!
//! [`METRIC_CATALOG`] lists each metric key together with its column title and the
//! [`MetricKind`] that decides how its raw value is formatted. The catalog order is the
//! column order of every report, so report views always iterate the catalog rather than
//! the per-project [`Measures`] map, which keeps columns aligned across projects that report
//! different subsets of metrics.

mod measures;
mod metric_def;
mod metric_kind;

pub use measures::Measures;
pub use metric_def::{METRIC_CATALOG, MetricDef, find, metric_keys_param};
pub use metric_kind::MetricKind;
