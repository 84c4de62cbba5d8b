//! Bounded message queues.
//!
//! Thin wrappers over bounded tokio channels: FIFO per producer, explicit
//! backpressure, single consumer per queue. The four routing contracts are
//! aliases over the message kind.

use std::sync::Arc;

use tokio::sync::mpsc;
use types::{Action, Command};

use crate::error::TransportError;

/// Producer half of a message queue. Cloneable; ordering is FIFO per
/// producer, with no guarantee across producers.
#[derive(Debug)]
pub struct QueueSender<M: ?Sized> {
    tx: mpsc::Sender<Arc<M>>,
    capacity: usize,
}

impl<M: ?Sized> Clone for QueueSender<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            capacity: self.capacity,
        }
    }
}

impl<M: ?Sized + Send + Sync + 'static> QueueSender<M> {
    /// Hand one message to the queue without blocking. A full queue is a
    /// [`TransportError::QueueFull`] error; the caller decides whether to
    /// retry.
    pub fn push(&self, message: Arc<M>) -> Result<(), TransportError> {
        self.tx.try_send(message).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => TransportError::QueueFull {
                capacity: self.capacity,
            },
            mpsc::error::TrySendError::Closed(_) => TransportError::QueueClosed,
        })
    }

    /// Whether the consuming half is still alive.
    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    /// Configured bound of the queue.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Consumer half of a message queue. Single consumer, owned by its
/// processor; ownership of each message transfers on dequeue.
#[derive(Debug)]
pub struct QueueReceiver<M: ?Sized> {
    rx: mpsc::Receiver<Arc<M>>,
}

impl<M: ?Sized + Send + Sync + 'static> QueueReceiver<M> {
    /// Await the next message; `None` once every sender is gone and the
    /// queue is drained.
    pub async fn recv(&mut self) -> Option<Arc<M>> {
        self.rx.recv().await
    }

    /// Take the next message if one is immediately available.
    pub fn try_recv(&mut self) -> Option<Arc<M>> {
        self.rx.try_recv().ok()
    }
}

/// Build one bounded queue with the given capacity.
pub fn queue<M: ?Sized + Send + Sync + 'static>(
    capacity: usize,
) -> (QueueSender<M>, QueueReceiver<M>) {
    let (tx, rx) = mpsc::channel(capacity);
    (QueueSender { tx, capacity }, QueueReceiver { rx })
}

/// Actions on their way to the server.
pub type OutgoingActions = QueueSender<dyn Action>;

/// Actions arriving at the server processor.
pub type IncomingActions = QueueReceiver<dyn Action>;

/// Commands on their way to the client.
pub type OutgoingCommands = QueueSender<dyn Command>;

/// Commands arriving at the client processor.
pub type IncomingCommands = QueueReceiver<dyn Command>;
