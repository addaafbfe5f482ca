use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::Deserialize;
use std::fs;
use std::io;

const LOG_TARGET: &str = "    config";

/// Name of the configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "sonar-stats.toml";

/// Settings read from the optional TOML configuration file.
///
/// Every value can also be given on the command line or through the environment, which take
/// precedence over the file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the SonarQube server
    #[serde(default)]
    pub url: Option<String>,

    /// API token used to authenticate
    #[serde(default)]
    pub token: Option<String>,

    /// Accept server certificates that fail validation
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// An explicit `config_path` must exist. Without one, `sonar-stats.toml` in `base_dir` is
    /// used if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::debug!(target: LOG_TARGET, "Loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a key is present but blank
    fn validate(&self) -> Result<()> {
        if self.url.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(app_err!("url must not be blank when set in the configuration file"));
        }

        if self.token.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(app_err!("token must not be blank when set in the configuration file"));
        }

        Ok(())
    }
}
