use super::{Client, Project, SonarError};
use serde::Deserialize;
use std::collections::HashSet;

const LOG_TARGET: &str = "  projects";

/// Number of projects requested per page.
pub const PAGE_SIZE: usize = 100;

const SEARCH_PATH: &str = "/api/projects/search";

#[derive(Debug, Deserialize)]
struct SearchPage {
    components: Vec<Project>,
}

/// Enumerate every project on the server.
///
/// Pages are requested until one comes back with fewer than [`PAGE_SIZE`] components. The
/// `paging.total` value reported by the server is ignored since it is not always present and
/// may count components that are not projects.
///
/// Projects created or deleted while the scan is in progress can shift page boundaries, which
/// may cause a project to be missed or seen twice. Repeated keys are dropped.
pub async fn list_all_projects(client: &Client) -> Result<Vec<Project>, SonarError> {
    list_projects_paged(client, PAGE_SIZE, |_| {}).await
}

/// Enumerate every project using the given page size, calling `on_page` with the running total after each page.
pub async fn list_projects_paged(
    client: &Client,
    page_size: usize,
    mut on_page: impl FnMut(usize),
) -> Result<Vec<Project>, SonarError> {
    let page_size = page_size.max(1);
    let page_size_param = page_size.to_string();
    let mut projects = Vec::new();
    let mut seen = HashSet::new();
    let mut page_num = 1usize;

    loop {
        let page_param = page_num.to_string();
        let page: SearchPage = client
            .get(SEARCH_PATH, &[("p", page_param.as_str()), ("ps", page_size_param.as_str())])
            .await?;

        let returned = page.components.len();
        log::debug!(target: LOG_TARGET, "Page {page_num} returned {returned} project(s)");

        for project in page.components {
            if seen.insert(project.key().to_string()) {
                projects.push(project);
            } else {
                log::debug!(target: LOG_TARGET, "Skipping repeated project '{}'", project.key());
            }
        }

        on_page(projects.len());

        if returned < page_size {
            break;
        }

        page_num += 1;
    }

    log::info!(target: LOG_TARGET, "Found {} project(s) in {page_num} page(s)", projects.len());
    Ok(projects)
}
