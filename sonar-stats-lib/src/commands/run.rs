//! Command dispatch logic for sonar-stats

use super::{StatsArgs, report_stats};
use crate::{Host, Result};
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "sonar-stats", version, author, long_about = None)]
#[command(about = "Report quality metrics for every project on a SonarQube server")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    stats: StatsArgs,
}

/// Parse command-line arguments and produce the report
///
/// It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if the report cannot be produced
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    report_stats(host, &cli.stats).await
}
