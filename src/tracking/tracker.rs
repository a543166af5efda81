//! Second phase: follow each copy until it reaches its discovered total.

use super::worker::{LOG_TARGET, Worker};
use super::{Phase, RetryLimiter, Sleeper, Task, TaskOutcome};
use crate::probe::{ProbeReading, StatusProbe};

impl<P: StatusProbe, S: Sleeper> Worker<P, S> {
    /// Probe on the poll interval until the copy completes or the task runs out of retries.
    ///
    /// `discovered` is the reading that ended discovery; it is reported as the starting point.
    pub(super) async fn track(self, task: Task, discovered: ProbeReading) -> (Task, TaskOutcome) {
        let outcome = self.track_core(&task, discovered).await;
        (task, outcome)
    }

    async fn track_core(&self, task: &Task, discovered: ProbeReading) -> TaskOutcome {
        let total = discovered.total();
        let mut limiter = RetryLimiter::new(self.settings.error_limit);

        self.progress.update(task, discovered, total);

        loop {
            match self.probe.probe(task.command()).await {
                Ok(reading) => {
                    limiter.record_success();

                    if !reading.is_queued() && reading.total() != total {
                        log::debug!(
                            target: LOG_TARGET,
                            "'{task}' reported a total of {} while tracking against {total}",
                            reading.total()
                        );
                    }

                    self.progress.update(task, reading, total);

                    if reading.actual() >= total {
                        log::debug!(target: LOG_TARGET, "Copy of '{task}' finished at {}/{total}", reading.actual());
                        return TaskOutcome::Completed(ProbeReading::new(reading.actual(), total));
                    }
                }

                Err(e) => {
                    let exhausted = limiter.record_failure();
                    log::warn!(
                        target: LOG_TARGET,
                        "Failed to check the copy status of '{task}' [{}/{}]: {e}",
                        limiter.consecutive_failures(),
                        limiter.limit()
                    );

                    if exhausted {
                        return self.abandon(task, Phase::Tracking, &limiter, e);
                    }
                }
            }

            self.sleeper.sleep(self.settings.poll_interval).await;
        }
    }
}
