//! First phase: find the total size of each copy.

use super::worker::{LOG_TARGET, Worker};
use super::{Phase, RetryLimiter, Sleeper, Task, TaskOutcome};
use crate::probe::StatusProbe;

impl<P: StatusProbe, S: Sleeper> Worker<P, S> {
    /// Probe until the task reports a usable total or runs out of retries.
    pub(super) async fn discover(self, task: Task) -> (Task, TaskOutcome) {
        let outcome = self.discover_core(&task).await;
        (task, outcome)
    }

    async fn discover_core(&self, task: &Task) -> TaskOutcome {
        let mut limiter = RetryLimiter::new(self.settings.error_limit);

        loop {
            match self.probe.probe(task.command()).await {
                Ok(reading) if reading.has_usable_total() => {
                    limiter.record_success();
                    log::debug!(target: LOG_TARGET, "Discovered total of {} for '{task}'", reading.total());
                    self.progress.size_discovered(task, reading.total());
                    return TaskOutcome::Completed(reading);
                }

                // Queued or zero-sized readings are expected before a copy starts and leave the budget alone.
                Ok(reading) => {
                    log::debug!(target: LOG_TARGET, "'{task}' has not started copying yet ({reading})");
                }

                Err(e) => {
                    let exhausted = limiter.record_failure();
                    log::warn!(
                        target: LOG_TARGET,
                        "Error finding the total size of '{task}' [{}/{}]: {e}",
                        limiter.consecutive_failures(),
                        limiter.limit()
                    );

                    if exhausted {
                        return self.abandon(task, Phase::Discovery, &limiter, e);
                    }
                }
            }

            self.sleeper.sleep(self.settings.discovery_backoff).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{ProbeError, ProbeErrorKind, ProbeReading};
    use crate::tracking::test_support::{
        Event, InstantSleeper, RecordingProgress, ScriptedProbe, invocation_error, ok, queued, worker,
    };
    use crate::tracking::PollSettings;
    use core::time::Duration;
    use std::sync::Arc;

    async fn discover(
        probe: ScriptedProbe,
        settings: PollSettings,
    ) -> (TaskOutcome, Arc<ScriptedProbe>, Arc<InstantSleeper>, Arc<RecordingProgress>, usize) {
        let probe = Arc::new(probe);
        let sleeper = Arc::new(InstantSleeper::default());
        let progress = Arc::new(RecordingProgress::default());
        let (worker, aggregator) = worker(Arc::clone(&probe), Arc::clone(&sleeper), Arc::clone(&progress), settings);

        let (_, outcome) = worker.discover(Task::new("westeurope", "probe")).await;
        let failures = aggregator.drain().len();

        (outcome, probe, sleeper, progress, failures)
    }

    #[tokio::test]
    async fn test_usable_total_on_first_probe() {
        let probe = ScriptedProbe::new().script("probe", [ok(0, 4096)]);
        let (outcome, probe, sleeper, progress, failures) = discover(probe, PollSettings::default()).await;

        assert_eq!(outcome, TaskOutcome::Completed(ProbeReading::new(0, 4096)));
        assert_eq!(probe.call_count("probe"), 1);
        assert!(sleeper.slept().is_empty());
        assert_eq!(progress.events(), [Event::SizeDiscovered("westeurope".into(), 4096)]);
        assert_eq!(failures, 0);
    }

    #[tokio::test]
    async fn test_zero_total_waits_without_failing() {
        let probe = ScriptedProbe::new().script("probe", [ok(0, 0), ok(0, 0), ok(50, 100)]);
        let (outcome, probe, sleeper, _, failures) = discover(probe, PollSettings::default()).await;

        assert_eq!(outcome, TaskOutcome::Completed(ProbeReading::new(50, 100)));
        assert_eq!(probe.call_count("probe"), 3);
        assert_eq!(sleeper.slept(), [Duration::from_secs(1); 2]);
        assert_eq!(failures, 0);
    }

    #[tokio::test]
    async fn test_queued_placeholder_is_not_terminal() {
        let probe = ScriptedProbe::new().script("probe", [queued(), queued(), queued(), ok(0, 1024)]);
        let (outcome, probe, _, _, failures) = discover(probe, PollSettings::default()).await;

        assert_eq!(outcome, TaskOutcome::Completed(ProbeReading::new(0, 1024)));
        assert_eq!(probe.call_count("probe"), 4);
        assert_eq!(failures, 0);
    }

    #[tokio::test]
    async fn test_queued_placeholder_does_not_consume_budget() {
        let settings = PollSettings {
            error_limit: 1,
            ..PollSettings::default()
        };
        let probe = ScriptedProbe::new().script("probe", [queued(), queued(), queued(), queued(), ok(0, 1024)]);
        let (outcome, _, _, _, failures) = discover(probe, settings).await;

        assert!(outcome.is_completed());
        assert_eq!(failures, 0);
    }

    #[tokio::test]
    async fn test_queued_placeholder_does_not_reset_budget() {
        let probe = ScriptedProbe::new().script(
            "probe",
            [
                invocation_error(),
                invocation_error(),
                queued(),
                invocation_error(),
                ok(0, 0),
                invocation_error(),
                invocation_error(),
                ok(0, 1024),
            ],
        );
        let (outcome, probe, _, _, failures) = discover(probe, PollSettings::default()).await;

        assert!(matches!(outcome, TaskOutcome::Abandoned(ref e) if e.kind() == ProbeErrorKind::Invocation));
        assert_eq!(probe.call_count("probe"), 7);
        assert_eq!(failures, 1);
    }

    #[tokio::test]
    async fn test_abandoned_after_error_limit() {
        let probe = ScriptedProbe::new().script(
            "probe",
            [
                invocation_error(),
                invocation_error(),
                invocation_error(),
                invocation_error(),
                Err(ProbeError::invocation("exit status: 7", "last")),
                ok(0, 1024),
            ],
        );
        let (outcome, probe, sleeper, progress, failures) = discover(probe, PollSettings::default()).await;

        assert_eq!(outcome, TaskOutcome::Abandoned(ProbeError::invocation("exit status: 7", "last")));
        assert_eq!(probe.call_count("probe"), 5);
        assert_eq!(sleeper.slept().len(), 4);
        assert_eq!(progress.events(), [Event::Abandoned("westeurope".into(), Phase::Discovery)]);
        assert_eq!(failures, 1);
    }

    #[tokio::test]
    async fn test_success_before_limit_resets_counter() {
        let probe = ScriptedProbe::new().script(
            "probe",
            [
                invocation_error(),
                invocation_error(),
                invocation_error(),
                invocation_error(),
                ok(0, 2048),
            ],
        );
        let (outcome, probe, _, _, failures) = discover(probe, PollSettings::default()).await;

        assert_eq!(outcome, TaskOutcome::Completed(ProbeReading::new(0, 2048)));
        assert_eq!(probe.call_count("probe"), 5);
        assert_eq!(failures, 0);
    }
}
