//! Scripted collaborators for driving the engine without processes or wall-clock time.

use super::worker::Worker;
use super::{ErrorAggregator, LimitExceededError, Phase, PollSettings, Progress, Sleeper, Task};
use crate::probe::{ProbeError, ProbeReading, StatusProbe};
use core::time::Duration;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

pub type Step = Result<ProbeReading, ProbeError>;

/// Replays a fixed sequence of results per command. The last step repeats once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedProbe {
    scripts: Mutex<HashMap<String, VecDeque<Step>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn script(self, command: &str, steps: impl IntoIterator<Item = Step>) -> Self {
        let _ = self
            .scripts
            .lock()
            .unwrap()
            .insert(command.to_string(), steps.into_iter().collect());
        self
    }

    /// Every command probed so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, command: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == command).count()
    }
}

impl StatusProbe for ScriptedProbe {
    async fn probe(&self, command: &str) -> Result<ProbeReading, ProbeError> {
        self.calls.lock().unwrap().push(command.to_string());

        let mut scripts = self.scripts.lock().unwrap();
        let steps = scripts.get_mut(command).expect("command has no script");
        if steps.len() > 1 {
            steps.pop_front().unwrap()
        } else {
            steps.front().cloned().expect("script must not be empty")
        }
    }
}

/// Returns immediately, remembering each requested delay.
#[derive(Debug, Default)]
pub struct InstantSleeper {
    slept: Mutex<Vec<Duration>>,
}

impl InstantSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

impl Sleeper for InstantSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
        tokio::task::yield_now().await;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Phase(Phase),
    SizeDiscovered(String, u64),
    Update(String, f64),
    Abandoned(String, Phase),
    Done,
}

/// Records every progress event in order.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<Event>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn percentages(&self, task: &str) -> Vec<f64> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Update(name, pct) if name == task => Some(pct),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Progress for RecordingProgress {
    fn set_phase(&self, phase: Phase) {
        self.push(Event::Phase(phase));
    }

    fn size_discovered(&self, task: &Task, total: u64) {
        self.push(Event::SizeDiscovered(task.name().to_string(), total));
    }

    fn update(&self, task: &Task, reading: ProbeReading, total: u64) {
        self.push(Event::Update(task.name().to_string(), reading.percentage_of(total)));
    }

    fn abandoned(&self, task: &Task, error: &LimitExceededError) {
        self.push(Event::Abandoned(task.name().to_string(), error.phase()));
    }

    fn done(&self) {
        self.push(Event::Done);
    }
}

pub fn ok(actual: u64, total: u64) -> Step {
    Ok(ProbeReading::new(actual, total))
}

pub fn queued() -> Step {
    Ok(ProbeReading::queued())
}

pub fn invocation_error() -> Step {
    Err(ProbeError::invocation("exit status: 1", "connection reset"))
}

pub fn format_error() -> Step {
    Err(ProbeError::Format {
        output: "unexpected".into(),
    })
}

/// Build a worker around the given collaborators, along with the aggregator its failures go to.
pub(super) fn worker<P, S>(
    probe: Arc<P>,
    sleeper: Arc<S>,
    progress: Arc<RecordingProgress>,
    settings: PollSettings,
) -> (Worker<P, S>, ErrorAggregator) {
    let aggregator = ErrorAggregator::new();
    let worker = Worker {
        probe,
        sleeper,
        progress,
        settings,
        errors: aggregator.sink(),
    };

    (worker, aggregator)
}
