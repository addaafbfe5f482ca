//! Settings shared by the command layer: output coloring, logging setup, progress timing.

use clap::ValueEnum;
use core::time::Duration;
use std::io::IsTerminal;

/// How long a run must take before the progress bar appears.
const PROGRESS_DELAY: Duration = Duration::from_millis(300);

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    /// Decide whether to color output sent to a stream.
    pub fn use_colors(self, stream: &impl IsTerminal) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stream.is_terminal(),
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

impl LogLevel {
    /// How long to wait before showing the progress bar.
    ///
    /// When informational logging is enabled the log lines already show what is going on, so
    /// the bar is effectively never shown.
    pub const fn progress_delay(self) -> Duration {
        match self {
            Self::None | Self::Error | Self::Warn => PROGRESS_DELAY,
            Self::Info | Self::Debug | Self::Trace => Duration::from_hours(365 * 24),
        }
    }
}

/// Initialize the logger based on log level.
///
/// `RUST_LOG` overrides the level when set. Only the first call in a process has any effect.
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_color_modes() {
        let stream = std::io::stdout();
        assert!(ColorMode::Always.use_colors(&stream));
        assert!(!ColorMode::Never.use_colors(&stream));
    }

    #[test]
    fn test_progress_delay_by_level() {
        assert_eq!(LogLevel::None.progress_delay(), PROGRESS_DELAY);
        assert_eq!(LogLevel::Warn.progress_delay(), PROGRESS_DELAY);
        assert!(LogLevel::Info.progress_delay() > Duration::from_secs(3600));
        assert!(LogLevel::Trace.progress_delay() > Duration::from_secs(3600));
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging(LogLevel::Warn);
        init_logging(LogLevel::Debug);
        init_logging(LogLevel::None);
    }
}
