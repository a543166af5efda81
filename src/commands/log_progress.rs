use super::common::PROGRESS_LOG_TARGET;
use crate::probe::ProbeReading;
use crate::tracking::{LimitExceededError, Phase, Progress, Task};

/// Sizes below this are placeholders rather than byte counts.
const EXACT_SIZE_THRESHOLD: u64 = 1024;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Reports progress as one log line per event, for non-interactive output.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

#[expect(clippy::cast_precision_loss, reason = "sizes are only displayed")]
fn gib(bytes: u64) -> f64 {
    bytes as f64 / GIB
}

impl Progress for LogProgress {
    fn set_phase(&self, phase: Phase) {
        match phase {
            Phase::Discovery => log::info!(target: PROGRESS_LOG_TARGET, "Getting copy sizes..."),
            Phase::Tracking => log::info!(target: PROGRESS_LOG_TARGET, "Tracking copy progress..."),
        }
    }

    fn size_discovered(&self, task: &Task, total: u64) {
        if total < EXACT_SIZE_THRESHOLD {
            log::info!(
                target: PROGRESS_LOG_TARGET,
                "'{task}' did not report exact numbers, but the copy is in progress"
            );
        } else {
            log::info!(target: PROGRESS_LOG_TARGET, "Size of '{task}' is {:.2} GiB", gib(total));
        }
    }

    fn update(&self, task: &Task, reading: ProbeReading, total: u64) {
        if total < EXACT_SIZE_THRESHOLD {
            log::info!(
                target: PROGRESS_LOG_TARGET,
                "'{task}' did not report exact numbers, but the copy is still in progress"
            );
        } else {
            log::info!(
                target: PROGRESS_LOG_TARGET,
                "Copy status of '{task}' is ({}/{total}) {:.2}%",
                reading.actual(),
                reading.percentage_of(total)
            );
        }
    }

    fn abandoned(&self, task: &Task, error: &LimitExceededError) {
        log::info!(
            target: PROGRESS_LOG_TARGET,
            "Stopped polling '{task}' while {} after repeated errors ({})",
            error.phase().to_string().to_lowercase(),
            error.last_error().kind()
        );
    }

    fn done(&self) {
        log::info!(target: PROGRESS_LOG_TARGET, "Finished polling");
    }
}
