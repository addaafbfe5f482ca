#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for sonar-stats
//!
//! This library holds all functionality for the sonar-stats tool, which lists every project
//! on a SonarQube server, retrieves a fixed catalog of quality metrics for each one, and
//! renders the results as an aligned table and as CSV.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`server`]: Talking to the SonarQube web API
//! - [`metrics`]: The metric catalog and per-project values
//! - [`reports`]: Table and CSV rendering

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod metrics;
pub mod reports;
pub mod server;

pub use crate::commands::{Host, run};
