use core::fmt::{Display, Formatter};

/// A single successful probe result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProbeReading {
    actual: u64,
    total: u64,
    queued: bool,
}

impl ProbeReading {
    /// Total reported for an operation that has been queued but not started yet.
    pub const QUEUED_TOTAL: u64 = 100;

    #[must_use]
    pub const fn new(actual: u64, total: u64) -> Self {
        Self {
            actual,
            total,
            queued: false,
        }
    }

    /// The placeholder reading used when the copy operation is still queued.
    #[must_use]
    pub const fn queued() -> Self {
        Self {
            actual: 0,
            total: Self::QUEUED_TOTAL,
            queued: true,
        }
    }

    #[must_use]
    pub const fn actual(&self) -> u64 {
        self.actual
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns `true` if this is the placeholder for a queued operation rather than real numbers.
    #[must_use]
    pub const fn is_queued(&self) -> bool {
        self.queued
    }

    /// Returns `true` if the reading carries a total that can be tracked against.
    #[must_use]
    pub const fn has_usable_total(&self) -> bool {
        !self.queued && self.total > 0
    }

    /// Percentage of `total` reached by this reading's `actual`, without clamping.
    ///
    /// Returns 0 when `total` is 0.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "percentages only need display precision")]
    pub fn percentage_of(&self, total: u64) -> f64 {
        if total == 0 {
            return 0.0;
        }

        self.actual as f64 / total as f64 * 100.0
    }
}

impl Display for ProbeReading {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if self.queued {
            write!(f, "queued")
        } else {
            write!(f, "{}/{}", self.actual, self.total)
        }
    }
}
