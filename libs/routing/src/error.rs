//! Routing error types.

use thiserror::Error;
use types::MessageType;

/// Errors raised by the catalog, indexers, and registry.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// A second handler type was indexed for an already-mapped action type.
    /// Startup-time conflict; composition must abort.
    #[error("duplicate handler for {message}: {existing} already mapped, rejected {rejected}")]
    DuplicateHandler {
        message: MessageType,
        existing: MessageType,
        rejected: MessageType,
    },

    /// A second receiver type was indexed for an already-mapped command
    /// type. Startup-time conflict; composition must abort.
    #[error("duplicate receiver for {message}: {existing} already mapped, rejected {rejected}")]
    DuplicateReceiver {
        message: MessageType,
        existing: MessageType,
        rejected: MessageType,
    },

    /// No handler or receiver is mapped for a message type seen at dispatch
    /// time. Recoverable per message; the pipeline keeps going.
    #[error("no handler for message type {message}")]
    NoHandlerForType { message: MessageType },

    /// No instance is registered for a contract.
    #[error("no registration for contract {contract}")]
    UnregisteredContract { contract: MessageType },
}

impl RoutingError {
    /// Routing-time miss for a message type.
    pub fn no_handler(message: MessageType) -> Self {
        Self::NoHandlerForType { message }
    }

    /// Resolution failure for a contract.
    pub fn unregistered(contract: MessageType) -> Self {
        Self::UnregisteredContract { contract }
    }

    /// Whether the pipeline can keep processing after this error.
    /// Indexing conflicts are structural defects and are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoHandlerForType { .. } | Self::UnregisteredContract { .. }
        )
    }
}
