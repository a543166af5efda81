//! Collection point for tasks that were abandoned.

use super::LimitExceededError;
use super::worker::LOG_TARGET;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Append-only, non-blocking writer handed to each worker.
#[derive(Debug, Clone)]
pub struct ErrorSink {
    tx: UnboundedSender<LimitExceededError>,
}

impl ErrorSink {
    /// Record an abandoned task. Never blocks.
    pub fn record(&self, error: LimitExceededError) {
        if let Err(e) = self.tx.send(error) {
            log::error!(target: LOG_TARGET, "Could not record abandoned task after the run finished: {}", e.0);
        }
    }
}

/// Owns the receiving side of the failures written by workers; drained once after the run.
#[derive(Debug)]
pub struct ErrorAggregator {
    tx: UnboundedSender<LimitExceededError>,
    rx: UnboundedReceiver<LimitExceededError>,
}

impl ErrorAggregator {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = unbounded_channel();
        Self { tx, rx }
    }

    #[must_use]
    pub fn sink(&self) -> ErrorSink {
        ErrorSink { tx: self.tx.clone() }
    }

    /// Take every failure recorded so far.
    ///
    /// Must only be called once all workers holding a sink have finished.
    #[must_use]
    pub fn drain(self) -> Vec<LimitExceededError> {
        let Self { tx, mut rx } = self;
        drop(tx);

        let mut failures = Vec::new();
        while let Ok(failure) = rx.try_recv() {
            failures.push(failure);
        }

        failures
    }
}

impl Default for ErrorAggregator {
    fn default() -> Self {
        Self::new()
    }
}
