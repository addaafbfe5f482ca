//! Report generation for collected project metrics
//!
//! Two views are rendered from the same ordered sequence of [`ProjectReport`] values:
//!
//! - **Table**: a fixed-width aligned table meant for people, with values formatted per metric
//!   kind (percentages, durations, rating letters, quality gate labels) and truncated to fit.
//! - **CSV**: a header row followed by one row per project, with raw metric values meant for
//!   import into other tools.
//!
//! The two views deliberately differ in how they fill in metrics the server did not report.
//! The table keeps `N/A` for everything except plain counts, while the CSV writes `0` for
//! every missing metric apart from the quality gate, which is written as its label.
//!
//! Both generators write into a [`core::fmt::Write`] and leave the choice of destination to
//! the caller.

mod common;
mod console;
mod csv;
mod project_report;

pub use common::{escape_csv, format_duration, format_percentage, format_quality_gate, format_rating, truncate};
pub use console::generate as generate_table;
pub use csv::generate as generate_csv;
pub use project_report::ProjectReport;
