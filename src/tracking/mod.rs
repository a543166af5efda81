//! The polling engine.
//!
//! Tracking a set of copy operations runs in two phases separated by a barrier:
//!
//! 1. **Discovery**: each task is probed until it reports a usable total size.
//! 2. **Tracking**: each task that has a total is probed on a fixed interval until the
//!    copied amount reaches that total.
//!
//! Every task gets its own worker in each phase. A worker owns its task's [`RetryLimiter`]
//! and gives up on the task after too many consecutive probe failures, writing the failure
//! to the run's [`ErrorAggregator`]. Failures never cross tasks: one abandoned task does not
//! disturb any other.

mod discovery;
mod error_sink;
mod orchestrator;
mod outcome;
mod progress;
mod retry_limiter;
mod settings;
mod sleeper;
mod task;
mod tracker;
mod worker;

#[cfg(test)]
pub(crate) mod test_support;

pub use error_sink::{ErrorAggregator, ErrorSink};
pub use orchestrator::Orchestrator;
pub use outcome::{LimitExceededError, Phase, RunVerdict, TaskOutcome};
pub use progress::Progress;
pub use retry_limiter::RetryLimiter;
pub use settings::{DEFAULT_DISCOVERY_BACKOFF, DEFAULT_ERROR_LIMIT, DEFAULT_POLL_INTERVAL, PollSettings};
pub use sleeper::{Sleeper, TokioSleeper};
pub use task::Task;
