use crate::metrics::Measures;
use crate::server::Project;

/// A project with the metrics retrieved for it, ready for reporting.
#[derive(Debug, Clone)]
pub struct ProjectReport {
    pub project: Project,
    pub metrics: Measures,
}

impl ProjectReport {
    #[must_use]
    pub const fn new(project: Project, metrics: Measures) -> Self {
        Self { project, metrics }
    }
}
