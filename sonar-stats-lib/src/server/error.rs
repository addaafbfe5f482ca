use reqwest::StatusCode;

/// Failures that can occur while talking to a SonarQube server.
///
/// The variants are kept distinct because callers apply different policies to them:
/// an enumeration failure aborts the run, while a per-project transport or API failure
/// only produces a warning and an empty row. Parse failures are always fatal since they
/// indicate an incompatible server version.
#[derive(Debug, thiserror::Error)]
pub enum SonarError {
    /// The server location or credentials are missing or still set to a placeholder.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The request never produced a response (connection refused, DNS, TLS, ...).
    #[error("unable to reach '{url}'")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with something other than 200 OK.
    #[error("request to '{url}' failed with status {status}: {body}")]
    Api { url: String, status: StatusCode, body: String },

    /// The response body did not have the expected JSON shape.
    #[error("unexpected response from '{url}'")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SonarError {
    /// Whether a per-project fetch that failed with this error should be skipped rather than abort the run.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Api { .. })
    }
}
