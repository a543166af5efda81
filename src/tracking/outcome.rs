use super::Task;
use crate::probe::{ProbeError, ProbeReading};
use core::fmt::{Display, Formatter};

/// The two polling phases a task goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Probing until the total size of the copy is known.
    Discovery,

    /// Probing until the copy reaches its total size.
    Tracking,
}

impl Phase {
    /// Short label suitable for a progress bar prefix.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Discovery => "Sizing",
            Self::Tracking => "Copying",
        }
    }

    const fn activity(self) -> &'static str {
        match self {
            Self::Discovery => "finding the total size",
            Self::Tracking => "checking the copy status",
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Terminal result of one task in one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The phase finished. The reading's total is the task's discovered total.
    Completed(ProbeReading),

    /// The task hit its error limit; carries the error of the last probe.
    Abandoned(ProbeError),
}

impl TaskOutcome {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// A task was abandoned after too many consecutive probe failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitExceededError {
    task: Task,
    phase: Phase,
    limit: u32,
    last_error: ProbeError,
}

impl LimitExceededError {
    #[must_use]
    pub const fn new(task: Task, phase: Phase, limit: u32, last_error: ProbeError) -> Self {
        Self {
            task,
            phase,
            limit,
            last_error,
        }
    }

    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub const fn last_error(&self) -> &ProbeError {
        &self.last_error
    }
}

impl Display for LimitExceededError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "error limit ({}) reached while {} of '{}': {}",
            self.limit,
            self.phase.activity(),
            self.task,
            self.last_error
        )
    }
}

impl core::error::Error for LimitExceededError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.last_error)
    }
}

/// Final result of a run, computed once after both phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunVerdict {
    Success,
    Failure(Vec<LimitExceededError>),
}

impl RunVerdict {
    /// Build a verdict from the abandoned tasks of a run, ordered by task name.
    #[must_use]
    pub fn from_failures(mut failures: Vec<LimitExceededError>) -> Self {
        if failures.is_empty() {
            return Self::Success;
        }

        failures.sort_by(|a, b| a.task.name().cmp(b.task.name()).then_with(|| a.phase.cmp(&b.phase)));
        Self::Failure(failures)
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    #[must_use]
    pub fn failures(&self) -> &[LimitExceededError] {
        match self {
            Self::Success => &[],
            Self::Failure(failures) => failures,
        }
    }

    pub fn failed_task_names(&self) -> impl Iterator<Item = &str> {
        self.failures().iter().map(|failure| failure.task.name())
    }
}
