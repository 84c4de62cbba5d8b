//! Transport layer: queues, the send contract, and loopback wiring.
//!
//! Messages move between peers through four queue contracts — incoming and
//! outgoing, per message kind:
//!
//! ```text
//! client ──OutgoingActions──>  transport  ──IncomingActions──>  server
//! client <─IncomingCommands──  transport  <─OutgoingCommands──  server
//! ```
//!
//! A transport implements [`Network`] and delivers received messages into
//! the queue senders it was constructed with — delivery is an explicit
//! queue hand-off, not a callback, so a transport never reenters handler
//! code. [`LoopbackNetwork`] is the single-process implementation: sends
//! land in the local incoming queues synchronously, with no remote peer
//! involved.

pub mod config;
pub mod error;
pub mod loopback;
pub mod queue;
pub mod transport;

pub use config::{ConfigError, QueueConfig};
pub use error::TransportError;
pub use loopback::{loopback_queues, LoopbackNetwork, LoopbackQueues};
pub use queue::{
    queue, IncomingActions, IncomingCommands, OutgoingActions, OutgoingCommands, QueueReceiver,
    QueueSender,
};
pub use transport::{Network, Outbound};

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;
