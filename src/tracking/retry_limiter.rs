/// Counts consecutive failed probes for one task.
///
/// Owned by the worker handling the task and never shared. Once the limit is reached the counter
/// stays there; the owning worker is expected to stop probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryLimiter {
    limit: u32,
    consecutive_failures: u32,
}

impl RetryLimiter {
    /// Create a limiter. A limit of 0 is treated as 1: a task always gets at least one probe.
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self {
            limit: if limit == 0 { 1 } else { limit },
            consecutive_failures: 0,
        }
    }

    pub const fn record_success(&mut self) {
        self.consecutive_failures = 0;
    }

    /// Count a failure. Returns `true` when this failure reaches the limit.
    pub fn record_failure(&mut self) -> bool {
        debug_assert!(!self.is_exhausted(), "probing continued past the error limit");

        self.consecutive_failures = (self.consecutive_failures + 1).min(self.limit);
        self.is_exhausted()
    }

    const fn is_exhausted(&self) -> bool {
        self.consecutive_failures >= self.limit
    }

    #[must_use]
    pub const fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }
}
