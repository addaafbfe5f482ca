use super::SonarError;
use core::fmt::{Debug, Formatter};
use url::Url;

/// Values shipped in sample configurations that must be replaced before use.
const PLACEHOLDERS: &[&str] = &[
    "YOUR_SONARQUBE_URL",
    "YOUR_SONARQUBE_TOKEN",
    "your_token_here",
    "your-sonar-token-here",
    "https://your-sonarqube-server.com",
];

/// Where the SonarQube server lives and how to authenticate against it.
///
/// Instances are only created through [`ServerConfig::new`], so holding one means the
/// location and credential have passed validation.
#[derive(Clone)]
pub struct ServerConfig {
    base_url: Url,
    token: String,
    accept_invalid_certs: bool,
}

impl ServerConfig {
    /// Validate the operator-supplied settings.
    ///
    /// # Errors
    ///
    /// Returns [`SonarError::Configuration`] if either value is missing, blank, a placeholder,
    /// or if the URL is not an absolute `http`/`https` URL.
    pub fn new(url: Option<&str>, token: Option<&str>, accept_invalid_certs: bool) -> Result<Self, SonarError> {
        let url = require("server URL", "--url or SONAR_URL", url)?;
        let token = require("API token", "--token or SONAR_TOKEN", token)?;

        let base_url = Url::parse(url.trim_end_matches('/'))
            .map_err(|e| SonarError::Configuration(format!("'{url}' is not a valid server URL: {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(SonarError::Configuration(format!(
                "server URL '{url}' must use http or https, not '{}'",
                base_url.scheme()
            )));
        }

        Ok(Self {
            base_url,
            token: token.to_string(),
            accept_invalid_certs,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether server certificates are accepted without chain validation.
    #[must_use]
    pub const fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }
}

impl Debug for ServerConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

fn require<'a>(what: &str, hint: &str, value: Option<&'a str>) -> Result<&'a str, SonarError> {
    let value = value.map(str::trim).unwrap_or_default();

    if value.is_empty() {
        return Err(SonarError::Configuration(format!("no {what} was provided (use {hint})")));
    }

    if PLACEHOLDERS.iter().any(|p| p.eq_ignore_ascii_case(value)) {
        return Err(SonarError::Configuration(format!(
            "the {what} is still set to the placeholder '{value}' (use {hint})"
        )));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = ServerConfig::new(Some("http://localhost:9000"), Some("squ_abc"), false).unwrap();
        assert_eq!(config.base_url().as_str(), "http://localhost:9000/");
        assert_eq!(config.token(), "squ_abc");
        assert!(!config.accept_invalid_certs());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ServerConfig::new(Some("https://sonar.example.com/sonar/"), Some("t"), true).unwrap();
        assert_eq!(config.base_url().as_str(), "https://sonar.example.com/sonar");
        assert!(config.accept_invalid_certs());
    }

    #[test]
    fn test_missing_url() {
        let err = ServerConfig::new(None, Some("t"), false).unwrap_err();
        assert!(matches!(err, SonarError::Configuration(_)));
        assert!(err.to_string().contains("server URL"));
    }

    #[test]
    fn test_blank_token() {
        let err = ServerConfig::new(Some("http://localhost:9000"), Some("   "), false).unwrap_err();
        assert!(matches!(err, SonarError::Configuration(_)));
        assert!(err.to_string().contains("API token"));
    }

    #[test]
    fn test_placeholder_url() {
        let err = ServerConfig::new(Some("YOUR_SONARQUBE_URL"), Some("t"), false).unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }

    #[test]
    fn test_placeholder_token_case_insensitive() {
        let err = ServerConfig::new(Some("http://localhost:9000"), Some("Your_Token_Here"), false).unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }

    #[test]
    fn test_placeholder_server_url() {
        let err = ServerConfig::new(Some("https://your-sonarqube-server.com"), Some("t"), false).unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }

    #[test]
    fn test_unparsable_url() {
        let err = ServerConfig::new(Some("localhost:9000 with spaces"), Some("t"), false).unwrap_err();
        assert!(matches!(err, SonarError::Configuration(_)));
    }

    #[test]
    fn test_non_http_scheme() {
        let err = ServerConfig::new(Some("ftp://sonar.example.com"), Some("t"), false).unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ServerConfig::new(Some("http://localhost:9000"), Some("super-secret"), false).unwrap();
        let text = format!("{config:?}");
        assert!(!text.contains("super-secret"));
        assert!(text.contains("<redacted>"));
    }
}
