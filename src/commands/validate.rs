use super::common::init_logging;
use super::{CommonArgs, Host};
use crate::Result;
use crate::config::TaskFile;
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the YAML task file to check
    #[arg(value_name = "TASKS")]
    pub tasks: Utf8PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Load a task file and list the tasks it declares.
///
/// # Errors
///
/// Returns an error if the task file cannot be read or is invalid
pub fn validate_tasks<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    init_logging(args.common.log_level, false);

    match TaskFile::load(&args.tasks) {
        Ok(file) => {
            let mut out = host.output();
            let _ = writeln!(out, "Task file is valid: {} task(s) in {}", file.len(), args.tasks);
            for task in file.tasks() {
                let _ = writeln!(out, "  {}: {}", task.name(), task.command());
            }

            Ok(())
        }

        Err(e) => {
            let _ = writeln!(host.error(), "❌ Task file validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
