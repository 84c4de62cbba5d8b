//! Processor metrics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by each processor.
#[derive(Debug, Default)]
pub struct ProcessorMetrics {
    processed: AtomicU64,
    failed: AtomicU64,
    responses: AtomicU64,
}

impl ProcessorMetrics {
    pub fn record_processed(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_response(&self) {
        self.responses.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time snapshot of the counters.
    pub fn snapshot(&self) -> ProcessorStats {
        ProcessorStats {
            processed: self.processed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            responses: self.responses.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of processor counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorStats {
    /// Messages routed and invoked successfully.
    pub processed: u64,
    /// Messages that failed routing or invocation.
    pub failed: u64,
    /// Responses pushed to the outgoing queue.
    pub responses: u64,
}
