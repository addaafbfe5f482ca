use super::{Client, SonarError};
use crate::metrics::{Measures, metric_keys_param};
use serde::{Deserialize, Deserializer};

const LOG_TARGET: &str = "  measures";

const MEASURES_PATH: &str = "/api/measures/component";

#[derive(Debug, Deserialize)]
struct ComponentResponse {
    component: Component,
}

#[derive(Debug, Deserialize)]
struct Component {
    measures: Vec<Measure>,
}

/// One entry of the `measures` array.
///
/// Most metrics report a top-level `value`; metrics computed on the new code period may
/// instead carry their value in a nested `period` object.
#[derive(Debug, Deserialize)]
struct Measure {
    metric: String,
    #[serde(default, deserialize_with = "lenient_value")]
    value: Option<String>,
    #[serde(default)]
    period: Option<Period>,
}

#[derive(Debug, Deserialize)]
struct Period {
    #[serde(default, deserialize_with = "lenient_value")]
    value: Option<String>,
}

impl Measure {
    /// The direct value if present, otherwise the new code period value.
    fn into_value(self) -> Option<String> {
        self.value.or_else(|| self.period.and_then(|p| p.value))
    }
}

/// Accept values the server encodes as JSON strings, numbers, or booleans.
fn lenient_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Retrieve the catalog metrics for one project.
///
/// This never fails for transport problems or unsuccessful responses: those are logged as a
/// warning and produce an empty [`Measures`], so one broken project cannot stop a batch. A
/// response that cannot be decoded is returned as [`SonarError::Parse`] since it points to an
/// incompatible server.
pub async fn fetch_metrics(client: &Client, project_key: &str) -> Result<Measures, SonarError> {
    match try_fetch_metrics(client, project_key).await {
        Ok(measures) => Ok(measures),
        Err(e) if e.is_recoverable() => {
            log::warn!(target: LOG_TARGET, "Could not retrieve metrics for project '{project_key}': {e}");
            Ok(Measures::new())
        }
        Err(e) => Err(e),
    }
}

/// Retrieve the catalog metrics for one project, reporting every failure to the caller.
pub async fn try_fetch_metrics(client: &Client, project_key: &str) -> Result<Measures, SonarError> {
    let keys = metric_keys_param();
    let response: ComponentResponse = client
        .get(MEASURES_PATH, &[("component", project_key), ("metricKeys", keys.as_str())])
        .await?;

    let measures = extract_measures(response.component.measures);
    log::debug!(target: LOG_TARGET, "Project '{project_key}' reported {} metric(s)", measures.len());
    Ok(measures)
}

fn extract_measures(entries: Vec<Measure>) -> Measures {
    let mut measures = Measures::new();
    for entry in entries {
        let metric = entry.metric.clone();
        if let Some(value) = entry.into_value()
            && !measures.insert(&metric, value)
        {
            log::debug!(target: LOG_TARGET, "Ignoring metric '{metric}' which was not requested");
        }
    }

    measures
}
