//! Command-line interface and orchestration for sonar-stats
//!
//! This module parses the command line, assembles the configuration, drives the
//! [`Collector`](crate::server::Collector) and writes the reports.
//!
//! # Implementation Model
//!
//! The `run` function parses command-line arguments using clap and hands them to the stats
//! command, which:
//!
//! 1. Initializes logging from `--log-level` (or `RUST_LOG`)
//! 2. Loads the optional TOML configuration file and merges command line and environment
//!    settings over it
//! 3. Validates the result into a `ServerConfig`, failing before any network traffic if the
//!    URL or token is missing or still a placeholder
//! 4. Collects every project's metrics while a progress bar runs on stderr
//! 5. Writes the optional table and the CSV report
//!
//! All terminal interaction goes through the [`Host`] trait so the full command can be
//! exercised from tests.

mod common;
mod config;
mod host;
mod progress_reporter;
mod run;
mod stats;

pub use common::{ColorMode, LogLevel};
pub use host::Host;
pub use progress_reporter::ProgressReporter;
pub use run::run;
pub use stats::{StatsArgs, report_stats};
