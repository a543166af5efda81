use super::common::init_logging;
use super::{CommonArgs, Host, LogProgress, ProgressMode, ProgressReporter};
use crate::Result;
use crate::config::TaskFile;
use crate::probe::CommandProbe;
use crate::tracking::{DEFAULT_ERROR_LIMIT, LimitExceededError, Orchestrator, PollSettings, Progress, RunVerdict};
use camino::Utf8PathBuf;
use clap::Parser;
use core::time::Duration;
use ohno::app_err;
use owo_colors::OwoColorize;
use std::io::Write;
use std::sync::Arc;

#[derive(Parser, Debug)]
pub struct TrackArgs {
    /// Path to the YAML task file mapping task names to status commands
    #[arg(value_name = "TASKS")]
    pub tasks: Utf8PathBuf,

    /// Consecutive failed status checks after which a task is abandoned
    #[arg(long, value_name = "N", env = "COPY_POLL_ERROR_LIMIT", default_value_t = DEFAULT_ERROR_LIMIT,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub error_limit: u32,

    /// Delay between status checks while finding the total size of a copy
    #[arg(long, value_name = "DURATION", default_value = "1s", value_parser = humantime::parse_duration)]
    pub discovery_backoff: Duration,

    /// Delay between status checks while a copy is in progress
    #[arg(long, value_name = "DURATION", env = "COPY_POLL_INTERVAL", default_value = "10s",
          value_parser = humantime::parse_duration)]
    pub poll_interval: Duration,

    /// Time after which a single status command is killed and counted as a failure
    #[arg(long, value_name = "DURATION", default_value = "5m", value_parser = humantime::parse_duration)]
    pub probe_timeout: Duration,

    /// How to show per-task progress
    #[arg(long, value_name = "MODE", default_value = "auto")]
    pub progress: ProgressMode,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl TrackArgs {
    #[must_use]
    pub const fn settings(&self) -> PollSettings {
        PollSettings {
            error_limit: self.error_limit,
            discovery_backoff: self.discovery_backoff,
            poll_interval: self.poll_interval,
        }
    }
}

/// Track every copy declared in the task file until each completes or is abandoned.
///
/// Prints `DONE` when every copy completed. Otherwise lists the abandoned tasks on the error
/// stream and exits with status 1.
///
/// # Errors
///
/// Returns an error if the task file or settings are invalid, or if any copy was abandoned.
pub async fn track_copies<H: Host>(host: &mut H, args: &TrackArgs) -> Result<()> {
    let mode = args.progress.resolve(args.common.log_level);
    init_logging(args.common.log_level, mode == ProgressMode::Log);

    let settings = args.settings();
    settings.validate()?;

    let tasks = TaskFile::load(&args.tasks)?;

    let use_colors = args.common.color.use_colors();
    let progress: Arc<dyn Progress> = match mode {
        ProgressMode::Bar => Arc::new(ProgressReporter::new(use_colors)),
        ProgressMode::Auto | ProgressMode::Log => Arc::new(LogProgress),
    };

    let orchestrator = Orchestrator::new(CommandProbe::new(args.probe_timeout), progress, settings);
    let verdict = orchestrator.run(tasks.into_tasks()).await;

    report(host, &verdict, use_colors)
}

fn report<H: Host>(host: &mut H, verdict: &RunVerdict, use_colors: bool) -> Result<()> {
    match verdict {
        RunVerdict::Success => {
            let _ = writeln!(host.output(), "DONE");
            Ok(())
        }

        RunVerdict::Failure(failures) => {
            {
                let mut out = host.error();
                for failure in failures {
                    let _ = writeln!(out, "{}", failure_line(failure, use_colors));
                }
            }

            host.exit(1);
            let names: Vec<_> = verdict.failed_task_names().collect();
            Err(app_err!("{} copy operation(s) were abandoned: {}", names.len(), names.join(", ")))
        }
    }
}

fn failure_line(failure: &LimitExceededError, use_colors: bool) -> String {
    if use_colors {
        format!("{} {failure}", "error:".red().bold())
    } else {
        format!("error: {failure}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::probe::ProbeError;
    use crate::tracking::{Phase, Task};

    fn failure(name: &str) -> LimitExceededError {
        LimitExceededError::new(
            Task::new(name, "true"),
            Phase::Tracking,
            5,
            ProbeError::Format {
                output: "nope".into(),
            },
        )
    }

    #[test]
    fn test_success_prints_done() {
        let mut host = TestHost::new();
        report(&mut host, &RunVerdict::Success, false).unwrap();

        assert_eq!(host.output_str(), "DONE\n");
        assert!(host.error_str().is_empty());
        assert_eq!(host.exit_code, None);
    }

    #[test]
    fn test_failure_lists_every_task_and_exits() {
        let mut host = TestHost::new();
        let verdict = RunVerdict::from_failures(vec![failure("west"), failure("east")]);

        let result = report(&mut host, &verdict, false);

        assert!(result.unwrap_err().to_string().contains("2 copy operation(s) were abandoned: east, west"));
        assert_eq!(host.exit_code, Some(1));
        assert!(host.output_str().is_empty());

        let errors = host.error_str();
        let lines: Vec<_> = errors.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("error: error limit (5) reached while checking the copy status of 'east'"));
        assert!(lines[1].contains("'west'"));
    }

    #[test]
    fn test_colored_failure_line() {
        let line = failure_line(&failure("east"), true);
        assert!(line.contains("\u{1b}["));
        assert!(line.contains("'east'"));
    }
}
