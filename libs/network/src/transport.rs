//! Transport send contract.

use std::sync::Arc;

use types::{Action, Command};

use crate::error::TransportError;

/// A message on its way to the remote peer.
#[derive(Debug, Clone)]
pub enum Outbound {
    /// Client → server.
    Action(Arc<dyn Action>),
    /// Server → client.
    Command(Arc<dyn Command>),
}

/// Send side of a transport.
///
/// An implementation delivers received messages into the incoming queue
/// senders it was constructed with. Marshaling onto a thread that may
/// safely enqueue is the transport's responsibility; the core never assumes
/// more than "delivery happens via a queue hand-off".
pub trait Network: Send + Sync {
    /// Hand one message to the transport for delivery.
    fn send(&self, outbound: Outbound) -> Result<(), TransportError>;
}
