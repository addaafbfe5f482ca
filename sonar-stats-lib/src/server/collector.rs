use super::progress::Progress;
use super::{Client, ServerConfig, SonarError, list_projects_paged, try_fetch_metrics};
use crate::Result;
use crate::metrics::{METRIC_CATALOG, Measures};
use crate::reports::ProjectReport;
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const LOG_TARGET: &str = " collector";

/// Collector for gathering the metrics of every project on a server
pub struct Collector {
    client: Client,
    page_size: usize,
    progress: Arc<dyn Progress>,
}

impl core::fmt::Debug for Collector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Collector")
            .field("client", &self.client)
            .field("page_size", &self.page_size)
            .field("progress", &"<dyn Progress>")
            .finish()
    }
}

impl Collector {
    pub fn new(config: &ServerConfig, progress: impl Progress + 'static) -> Result<Self> {
        Ok(Self {
            client: Client::new(config)?,
            page_size: super::PAGE_SIZE,
            progress: Arc::new(progress),
        })
    }

    /// Use a different page size when listing projects.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// List every project, then fetch the metrics of each one in turn.
    ///
    /// The project list is fetched completely before any metrics are requested, and projects
    /// are processed one at a time in the order the server listed them. A failure while listing
    /// projects is returned since no report can be built without the list. A project whose
    /// metrics cannot be retrieved yields a report with no metrics, and a warning is printed
    /// through the progress indicator so it does not tear the bar.
    pub async fn collect(&self) -> core::result::Result<Vec<ProjectReport>, SonarError> {
        let result = self.collect_inner().await;
        self.progress.done();
        result
    }

    async fn collect_inner(&self) -> core::result::Result<Vec<ProjectReport>, SonarError> {
        let found = Arc::new(AtomicU64::new(0));

        self.progress.set_phase("Listing");
        let found_clone = Arc::clone(&found);
        self.progress
            .set_indeterminate(Box::new(move || format!("{} project(s) found", found_clone.load(Ordering::Relaxed))));

        let projects = list_projects_paged(&self.client, self.page_size, |count| {
            found.store(count as u64, Ordering::Relaxed);
        })
        .await?;

        if projects.is_empty() {
            return Ok(Vec::new());
        }

        let total = projects.len() as u64;
        let completed = Arc::new(AtomicU64::new(0));

        self.progress.set_phase("Fetching");
        let completed_clone = Arc::clone(&completed);
        self.progress.set_determinate(Box::new(move || {
            let done = completed_clone.load(Ordering::Relaxed);
            (total, done, format!("{done}/{total} projects"))
        }));

        for def in METRIC_CATALOG {
            log::trace!(target: LOG_TARGET, "Requesting metric '{}' ({})", def.key, def.kind);
        }

        let mut reports = Vec::with_capacity(projects.len());
        for project in projects {
            log::debug!(target: LOG_TARGET, "Fetching metrics for {project}");
            let measures = match try_fetch_metrics(&self.client, project.key()).await {
                Ok(measures) => measures,
                Err(e) if e.is_recoverable() => {
                    log::debug!(target: LOG_TARGET, "Metrics of {project} are unavailable: {e}");
                    self.progress
                        .println(&format!("⚠️ Could not retrieve metrics for project '{}': {e}", project.key()));
                    Measures::new()
                }
                Err(e) => return Err(e),
            };
            reports.push(ProjectReport::new(project, measures));
            let _ = completed.fetch_add(1, Ordering::Relaxed);
        }

        let without_metrics = reports.iter().filter(|r| r.metrics.is_empty()).count();
        log::info!(
            target: LOG_TARGET,
            "Collected metrics for {} project(s), {without_metrics} without any metrics",
            reports.len()
        );

        Ok(reports)
    }
}
