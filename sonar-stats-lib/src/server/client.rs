//! SonarQube web API client
//!
//! Minimal client that issues authenticated GET requests and decodes JSON responses.

use super::{ServerConfig, SonarError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

const LOG_TARGET: &str = "    client";

/// SonarQube API client
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// Create a client for the configured server.
    ///
    /// Every request carries HTTP Basic authentication with the token as the user name and an
    /// empty password, which is the scheme SonarQube uses for user tokens.
    pub fn new(config: &ServerConfig) -> crate::Result<Self> {
        let mut auth_val = HeaderValue::from_str(&basic_auth_value(config.token()))?;
        auth_val.set_sensitive(true);

        let mut headers = HeaderMap::new();
        let _ = headers.insert(AUTHORIZATION, auth_val);
        let _ = headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut client_builder = reqwest::Client::builder()
            .user_agent(concat!("sonar-stats/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);

        if config.accept_invalid_certs() {
            log::warn!(target: LOG_TARGET, "TLS certificate validation is DISABLED for '{}'", config.base_url());
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            client: client_builder.build()?,
            base_url: config.base_url().clone(),
        })
    }

    /// Get the base URL for this client
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issue a GET request against `path` and decode the JSON body.
    ///
    /// Query parameters are form-encoded, so values such as project keys may contain
    /// characters that are not URL safe.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, SonarError> {
        let url = self.endpoint(path, query)?;
        log::debug!(target: LOG_TARGET, "GET {url}");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| SonarError::Transport { url: url.to_string(), source })?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|source| SonarError::Transport { url: url.to_string(), source })?;

        if status != StatusCode::OK {
            return Err(SonarError::Api {
                url: url.to_string(),
                status,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| SonarError::Parse { url: url.to_string(), source })
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, SonarError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{path}"))
            .map_err(|e| SonarError::Configuration(format!("unable to build request URL for '{path}': {e}")))?;

        if !query.is_empty() {
            let _ = url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }
}

/// Build the `Authorization` header value for a token.
fn basic_auth_value(token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{token}:")))
}
