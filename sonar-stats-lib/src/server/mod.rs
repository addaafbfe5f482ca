//! Data collection from a SonarQube server
//!
//! This module talks to the server's web API to list projects and retrieve their metrics.
//!
//! # Implementation Model
//!
//! - [`Client`] issues authenticated GET requests and decodes JSON, classifying failures
//!   as a [`SonarError`].
//! - [`list_all_projects`] pages through `/api/projects/search` until a short page is seen.
//! - [`fetch_metrics`] reads `/api/measures/component` for a single project, taking each
//!   metric's direct value or, failing that, its new code period value.
//! - [`Collector`] runs the two steps in sequence and produces one
//!   [`ProjectReport`](crate::reports::ProjectReport) per project.
//!
//! Everything runs sequentially: the full project list is retrieved before any metrics are
//! requested, and metrics are requested one project at a time.

mod client;
mod collector;
mod error;
mod measures;
mod progress;
mod project;
mod projects;
mod server_config;

pub use client::Client;
pub use collector::Collector;
pub use error::SonarError;
pub use measures::{fetch_metrics, try_fetch_metrics};
pub use progress::Progress;
pub use project::Project;
pub use projects::{PAGE_SIZE, list_all_projects, list_projects_paged};
pub use server_config::ServerConfig;
