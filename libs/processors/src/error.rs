//! Processing error types.

use network::TransportError;
use routing::RoutingError;
use thiserror::Error;
use types::MessageType;

/// Failure to process one message.
///
/// Always scoped to the message that triggered it; the processor and its
/// queue stay usable.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Lookup or resolution failed for this message.
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// The handler or receiver invocation itself failed. The message is
    /// dropped after reporting.
    #[error("invocation failed for {message}: {source}")]
    Invocation {
        message: MessageType,
        #[source]
        source: anyhow::Error,
    },

    /// The response could not be enqueued.
    #[error("response for {message} not enqueued: {source}")]
    Respond {
        message: MessageType,
        #[source]
        source: TransportError,
    },
}
