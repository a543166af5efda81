//! Status probes: one invocation of a task's status command, reduced to a reading or a classified error.
//!
//! The tracking engine only sees the [`StatusProbe`] trait. [`CommandProbe`] is the production
//! implementation that runs the command through the system shell and hands the captured output
//! to [`interpret_output`].

mod command;
mod error;
mod parse;
mod reading;

pub use command::{CommandProbe, DEFAULT_PROBE_TIMEOUT};
pub use error::{ProbeError, ProbeErrorKind, ReadingField};
pub use parse::{ACCEPTED_STATUSES, PENDING_COPY_MARKER, interpret_output, parse_output};
pub use reading::ProbeReading;

use std::sync::Arc;

/// A source of progress readings for a status command.
///
/// Each call is a discrete event; implementations must not rely on memory of earlier calls
/// made for the same command.
pub trait StatusProbe: Send + Sync {
    /// Run one probe for `command`.
    fn probe(&self, command: &str) -> impl Future<Output = Result<ProbeReading, ProbeError>> + Send;
}

impl<T: StatusProbe> StatusProbe for Arc<T> {
    fn probe(&self, command: &str) -> impl Future<Output = Result<ProbeReading, ProbeError>> + Send {
        (**self).probe(command)
    }
}
