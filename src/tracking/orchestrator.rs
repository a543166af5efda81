use super::worker::{LOG_TARGET, Worker};
use super::{ErrorAggregator, Phase, PollSettings, Progress, RunVerdict, Sleeper, Task, TaskOutcome, TokioSleeper};
use crate::probe::{ProbeReading, StatusProbe};
use futures_util::future::join_all;
use std::sync::Arc;

/// Runs the discovery phase for every task, then the tracking phase for the tasks that
/// survived it, and reports the overall verdict.
pub struct Orchestrator<P, S = TokioSleeper> {
    probe: Arc<P>,
    sleeper: Arc<S>,
    progress: Arc<dyn Progress>,
    settings: PollSettings,
}

impl<P, S> core::fmt::Debug for Orchestrator<P, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("progress", &"<dyn Progress>")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl<P: StatusProbe + 'static> Orchestrator<P> {
    /// Create an orchestrator that waits on the tokio timer.
    pub fn new(probe: P, progress: Arc<dyn Progress>, settings: PollSettings) -> Self {
        Self::with_sleeper(probe, TokioSleeper, progress, settings)
    }
}

impl<P: StatusProbe + 'static, S: Sleeper + 'static> Orchestrator<P, S> {
    pub fn with_sleeper(probe: P, sleeper: S, progress: Arc<dyn Progress>, settings: PollSettings) -> Self {
        Self {
            probe: Arc::new(probe),
            sleeper: Arc::new(sleeper),
            progress,
            settings,
        }
    }

    /// Poll every task to a terminal state and compute the verdict.
    ///
    /// Tracking for any task starts only once discovery is terminal for all tasks.
    pub async fn run(&self, tasks: impl IntoIterator<Item = Task>) -> RunVerdict {
        let aggregator = ErrorAggregator::new();
        let worker = Worker {
            probe: Arc::clone(&self.probe),
            sleeper: Arc::clone(&self.sleeper),
            progress: Arc::clone(&self.progress),
            settings: self.settings,
            errors: aggregator.sink(),
        };

        let tasks: Vec<_> = tasks.into_iter().collect();
        log::info!(target: LOG_TARGET, "Finding the total size of {} copy operation(s)", tasks.len());

        self.progress.set_phase(Phase::Discovery);
        let discovered = Self::discovery_phase(&worker, tasks).await;

        log::info!(target: LOG_TARGET, "Tracking {} copy operation(s)", discovered.len());

        self.progress.set_phase(Phase::Tracking);
        let tracked = Self::tracking_phase(&worker, discovered).await;

        let completed = tracked.iter().filter(|(_, outcome)| outcome.is_completed()).count();
        log::info!(target: LOG_TARGET, "{completed} copy operation(s) completed");

        drop(worker);
        self.progress.done();

        RunVerdict::from_failures(aggregator.drain())
    }

    async fn discovery_phase(worker: &Worker<P, S>, tasks: Vec<Task>) -> Vec<(Task, ProbeReading)> {
        join_all(tasks.into_iter().map(|task| tokio::spawn(worker.clone().discover(task))))
            .await
            .into_iter()
            .map(|result| result.expect("tasks must not panic"))
            .filter_map(|(task, outcome)| match outcome {
                TaskOutcome::Completed(reading) => Some((task, reading)),
                TaskOutcome::Abandoned(_) => None,
            })
            .collect()
    }

    async fn tracking_phase(worker: &Worker<P, S>, discovered: Vec<(Task, ProbeReading)>) -> Vec<(Task, TaskOutcome)> {
        join_all(
            discovered
                .into_iter()
                .map(|(task, reading)| tokio::spawn(worker.clone().track(task, reading))),
        )
        .await
        .into_iter()
        .map(|result| result.expect("tasks must not panic"))
        .collect()
    }
}
