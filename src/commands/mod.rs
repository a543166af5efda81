//! Command-line interface for copy-poll
//!
//! # Commands
//!
//! - **track**: Load a task file, find the total size of every copy operation, then follow each
//!   copy until it completes or its status command fails too many times in a row
//! - **validate**: Load a task file and list the tasks it declares
//!
//! The `run` function parses command-line arguments using clap and routes to the appropriate
//! command handler. All output goes through a [`Host`] so that commands can be exercised in
//! tests without touching the real process streams or exiting.
//!
//! Progress is rendered either as one `indicatif` bar per task ([`ProgressReporter`]) or as
//! plain log lines ([`LogProgress`]), depending on `--progress` and whether stderr is a terminal.

mod common;
mod host;
mod log_progress;
mod progress_reporter;
mod run;
mod track;
mod validate;

pub use common::{ColorMode, CommonArgs, LogLevel, ProgressMode};
pub use host::Host;
pub use log_progress::LogProgress;
pub use progress_reporter::ProgressReporter;
pub use run::run;
pub use track::{TrackArgs, track_copies};
pub use validate::{ValidateArgs, validate_tasks};
