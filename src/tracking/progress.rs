use super::{LimitExceededError, Phase, Task};
use crate::probe::ProbeReading;

/// A trait for reporting per-task progress of a polling run.
///
/// Called concurrently from every worker, so implementations must be cheap and must not block
/// for long.
pub trait Progress: Send + Sync {
    /// A new phase has started for all tasks.
    fn set_phase(&self, phase: Phase);

    /// The total size of a task's copy is now known.
    fn size_discovered(&self, task: &Task, total: u64);

    /// A task reported progress. `total` is the discovered total the reading is measured against.
    fn update(&self, task: &Task, reading: ProbeReading, total: u64);

    /// A task was abandoned.
    fn abandoned(&self, task: &Task, error: &LimitExceededError);

    /// Finish and clear the progress indicator.
    fn done(&self);
}
