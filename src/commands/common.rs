//! Settings and setup shared by the commands.

use clap::{Args, ValueEnum};
use std::io::{IsTerminal, stderr};

/// Log target used by the log-line progress renderer, enabled whenever that renderer is active.
pub(super) const PROGRESS_LOG_TARGET: &str = "progress";

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
    /// Whether output written to stderr should be colored.
    #[must_use]
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stderr().is_terminal(),
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
    const fn filter(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Error => Some("error"),
            Self::Warn => Some("warn"),
            Self::Info => Some("info"),
            Self::Debug => Some("debug"),
            Self::Trace => Some("trace"),
        }
    }
}

/// How per-task progress is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProgressMode {
    /// Progress bars when stderr is a terminal and logging is off, log lines otherwise
    Auto,

    /// One progress bar per task
    Bar,

    /// One log line per progress report
    Log,
}

impl ProgressMode {
    /// Settle `Auto` into a concrete mode.
    #[must_use]
    pub fn resolve(self, log_level: LogLevel) -> Self {
        match self {
            Self::Auto if log_level == LogLevel::None && stderr().is_terminal() => Self::Bar,
            Self::Auto => Self::Log,
            other => other,
        }
    }
}

/// Common arguments shared by the commands
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// Initialize the logger.
///
/// `progress_lines` keeps the progress target enabled at info regardless of `log_level`, so the
/// log-line renderer is visible even when diagnostics are off. `RUST_LOG` overrides both.
pub fn init_logging(log_level: LogLevel, progress_lines: bool) {
    let filter = match (log_level.filter(), progress_lines) {
        (None, false) => return,
        (None, true) => format!("{PROGRESS_LOG_TARGET}=info"),
        (Some(level), false) => level.to_string(),
        (Some(level), true) => format!("{level},{PROGRESS_LOG_TARGET}=info"),
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", filter);

    let mut builder = env_logger::Builder::from_env(env);
    let _ = builder
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace));

    if progress_lines {
        let _ = builder.format_timestamp_secs();
    } else {
        let _ = builder.format_timestamp(None);
    }

    // A logger may already be installed when commands run more than once in a process.
    let _ = builder.try_init();
}
