use super::common::{ColorMode, LogLevel, init_logging};
use super::config::Config;
use super::{Host, ProgressReporter};
use crate::Result;
use crate::reports::{ProjectReport, generate_csv, generate_table};
use crate::server::{Collector, ServerConfig};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use ohno::IntoAppError;
use std::fs;
use std::io::{Write, stdout};

const LOG_TARGET: &str = "     stats";

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Base URL of the SonarQube server
    #[arg(long, value_name = "URL", env = "SONAR_URL")]
    pub url: Option<String>,

    /// API token used to authenticate against the server
    #[arg(long, value_name = "TOKEN", env = "SONAR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Path to configuration file (default is `sonar-stats.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Accept server certificates that fail validation (insecure)
    #[arg(long)]
    pub accept_invalid_certs: bool,

    /// Print an aligned table before the CSV output
    #[arg(long, help_heading = "Report Output")]
    pub table: bool,

    /// Write the CSV output to a file instead of to the terminal
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: LogLevel,
}

/// Collect metrics for every project on the server and print the report.
///
/// Any failure that prevents a report from being produced is written to the host's error
/// stream and the host is asked to exit with status 1.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the project list cannot be retrieved,
/// or the report cannot be written
pub async fn report_stats<H: Host>(host: &mut H, args: &StatsArgs) -> Result<()> {
    init_logging(args.log_level);

    match report_stats_inner(host, args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Unable to produce the SonarQube report: {e:#}");
            host.exit(1);
            Err(e)
        }
    }
}

async fn report_stats_inner<H: Host>(host: &mut H, args: &StatsArgs) -> Result<()> {
    let file_config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    let server_config = resolve_server_config(args, &file_config)?;
    log::info!(target: LOG_TARGET, "Reporting on {server_config:?}");

    let progress = ProgressReporter::new(
        args.log_level.progress_delay(),
        args.color.use_colors(&std::io::stderr()),
    );

    let reports = Collector::new(&server_config, progress)?
        .collect()
        .await
        .into_app_err_with(|| format!("collecting project metrics from '{}'", server_config.base_url()))?;

    if reports.is_empty() {
        let _ = writeln!(host.error(), "No projects found on '{}'", server_config.base_url());
        return Ok(());
    }

    write_reports(host, args, &reports)
}

/// Merge command line and environment settings over the configuration file.
fn resolve_server_config(args: &StatsArgs, file_config: &Config) -> Result<ServerConfig> {
    let url = args.url.as_deref().or(file_config.url.as_deref());
    let token = args.token.as_deref().or(file_config.token.as_deref());
    let accept_invalid_certs = args.accept_invalid_certs || file_config.accept_invalid_certs;

    Ok(ServerConfig::new(url, token, accept_invalid_certs)?)
}

fn write_reports<H: Host>(host: &mut H, args: &StatsArgs, reports: &[ProjectReport]) -> Result<()> {
    let mut console_output = String::new();

    if args.table {
        generate_table(reports, args.color.use_colors(&stdout()), &mut console_output)?;
    }

    let mut csv_output = String::new();
    generate_csv(reports, &mut csv_output)?;

    if let Some(path) = &args.csv {
        fs::write(path, csv_output).into_app_err_with(|| format!("writing CSV report to '{path}'"))?;
        log::info!(target: LOG_TARGET, "Wrote {} project(s) to '{path}'", reports.len());
    } else {
        if !console_output.is_empty() {
            console_output.push('\n');
        }
        console_output.push_str(&csv_output);
    }

    if !console_output.is_empty() {
        write!(host.output(), "{console_output}").into_app_err("writing report")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    fn args() -> StatsArgs {
        StatsArgs {
            url: None,
            token: None,
            config: None,
            accept_invalid_certs: false,
            table: false,
            csv: None,
            color: ColorMode::Never,
            log_level: LogLevel::None,
        }
    }

    #[test]
    fn test_flags_override_file() {
        let args = StatsArgs {
            url: Some("https://flag.example.com".to_string()),
            ..args()
        };
        let file_config = Config {
            url: Some("https://file.example.com".to_string()),
            token: Some("file_token".to_string()),
            accept_invalid_certs: false,
        };

        let config = resolve_server_config(&args, &file_config).unwrap();
        assert_eq!(config.base_url().as_str(), "https://flag.example.com/");
        assert_eq!(config.token(), "file_token");
    }

    #[test]
    fn test_accept_invalid_certs_from_either_source() {
        let file_config = Config {
            url: Some("https://sonar.example.com".to_string()),
            token: Some("t".to_string()),
            accept_invalid_certs: true,
        };
        assert!(resolve_server_config(&args(), &file_config).unwrap().accept_invalid_certs());

        let args = StatsArgs {
            accept_invalid_certs: true,
            ..args()
        };
        let file_config = Config {
            accept_invalid_certs: false,
            ..file_config
        };
        assert!(resolve_server_config(&args, &file_config).unwrap().accept_invalid_certs());
    }

    #[test]
    fn test_missing_settings_are_rejected() {
        assert!(resolve_server_config(&args(), &Config::default()).is_err());
    }

    #[test]
    fn test_placeholder_from_file_is_rejected() {
        let file_config = Config {
            url: Some("https://your-sonarqube-server.com".to_string()),
            token: Some("t".to_string()),
            accept_invalid_certs: false,
        };
        assert!(resolve_server_config(&args(), &file_config).is_err());
    }

    #[tokio::test]
    async fn test_configuration_error_is_reported_to_host() {
        let mut host = TestHost::new();
        let args = StatsArgs {
            token: Some("squ_abc".to_string()),
            ..args()
        };

        let result = report_stats(&mut host, &args).await;

        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(1));
        assert!(host.output_buf.is_empty());
        let error = host.error_str();
        assert!(error.contains("Unable to produce the SonarQube report"), "unexpected error output: {error}");
    }
}
