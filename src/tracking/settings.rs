use crate::Result;
use core::time::Duration;
use ohno::bail;

/// Default number of consecutive failed probes after which a task is abandoned.
pub const DEFAULT_ERROR_LIMIT: u32 = 5;

/// Default wait between probes while discovering a task's total size.
pub const DEFAULT_DISCOVERY_BACKOFF: Duration = Duration::from_secs(1);

/// Default wait between probes while tracking a task's progress.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Timing and failure tolerance for a polling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub error_limit: u32,
    pub discovery_backoff: Duration,
    pub poll_interval: Duration,
}

impl PollSettings {
    /// Check that the settings describe a run that can terminate.
    pub fn validate(&self) -> Result<()> {
        if self.error_limit == 0 {
            bail!("the error limit must be at least 1");
        }

        Ok(())
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            error_limit: DEFAULT_ERROR_LIMIT,
            discovery_backoff: DEFAULT_DISCOVERY_BACKOFF,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}
