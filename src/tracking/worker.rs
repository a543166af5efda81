use super::{ErrorSink, LimitExceededError, Phase, PollSettings, Progress, RetryLimiter, Task, TaskOutcome};
use crate::probe::ProbeError;
use std::sync::Arc;

pub(super) const LOG_TARGET: &str = "  tracking";

/// Everything a per-task worker needs, cheap to clone into each spawned task.
pub(super) struct Worker<P, S> {
    pub(super) probe: Arc<P>,
    pub(super) sleeper: Arc<S>,
    pub(super) progress: Arc<dyn Progress>,
    pub(super) settings: PollSettings,
    pub(super) errors: ErrorSink,
}

impl<P, S> Clone for Worker<P, S> {
    fn clone(&self) -> Self {
        Self {
            probe: Arc::clone(&self.probe),
            sleeper: Arc::clone(&self.sleeper),
            progress: Arc::clone(&self.progress),
            settings: self.settings,
            errors: self.errors.clone(),
        }
    }
}

impl<P, S> core::fmt::Debug for Worker<P, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Worker")
            .field("progress", &"<dyn Progress>")
            .field("settings", &self.settings)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl<P, S> Worker<P, S> {
    /// Give up on a task: report it once and hand back the terminal outcome.
    pub(super) fn abandon(&self, task: &Task, phase: Phase, limiter: &RetryLimiter, error: ProbeError) -> TaskOutcome {
        let failure = LimitExceededError::new(task.clone(), phase, limiter.limit(), error.clone());
        log::error!(target: LOG_TARGET, "{failure}");

        self.progress.abandoned(task, &failure);
        self.errors.record(failure);

        TaskOutcome::Abandoned(error)
    }
}
