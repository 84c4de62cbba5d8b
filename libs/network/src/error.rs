//! Transport error types.

use thiserror::Error;

/// Errors raised by queues and transports.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The destination queue is at capacity. Backpressure is surfaced to
    /// the caller; nothing in the core blocks or drops silently.
    #[error("queue full: capacity {capacity} reached")]
    QueueFull { capacity: usize },

    /// The consuming side of the queue is gone.
    #[error("queue closed")]
    QueueClosed,
}

impl TransportError {
    /// Whether a retry can reasonably succeed later.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::QueueFull { .. })
    }
}
