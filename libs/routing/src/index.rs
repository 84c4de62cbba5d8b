//! Message-type → handler-type indexes.
//!
//! The indexers scan catalog entries for routing capabilities and enforce
//! the uniqueness invariant: at most one handler per action type, at most
//! one receiver per command type. A second, different mapping for an
//! already-mapped message is a conflict, never a silent overwrite.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;
use types::{
    Capability, ErasedActionHandler, ErasedCommandReceiver, HandlerFactory, MessageType,
    ReceiverFactory, TypeDescriptor,
};

use crate::error::RoutingError;

/// Mapping target for one action type.
#[derive(Clone)]
pub struct HandlerBinding {
    handler: MessageType,
    factory: HandlerFactory,
}

impl HandlerBinding {
    /// Identity of the handler type.
    pub fn handler_type(&self) -> MessageType {
        self.handler
    }

    /// Build the erased handler instance. Composition calls this once per
    /// binding and keeps the result in the registry as the singleton.
    pub fn construct(&self) -> Arc<dyn ErasedActionHandler> {
        (self.factory)()
    }
}

impl fmt::Debug for HandlerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerBinding")
            .field("handler", &self.handler)
            .finish_non_exhaustive()
    }
}

/// Mapping target for one command type.
#[derive(Clone)]
pub struct ReceiverBinding {
    receiver: MessageType,
    factory: ReceiverFactory,
}

impl ReceiverBinding {
    /// Identity of the receiver type.
    pub fn receiver_type(&self) -> MessageType {
        self.receiver
    }

    /// Build the erased receiver instance.
    pub fn construct(&self) -> Arc<dyn ErasedCommandReceiver> {
        (self.factory)()
    }
}

impl fmt::Debug for ReceiverBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiverBinding")
            .field("receiver", &self.receiver)
            .finish_non_exhaustive()
    }
}

/// Derives and serves the action → handler mapping.
#[derive(Debug, Default)]
pub struct ActionIndexer {
    by_message: HashMap<MessageType, HandlerBinding>,
    by_handler: HashMap<MessageType, HandlerBinding>,
}

impl ActionIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect one catalog entry and record the mapping when it describes
    /// an action handler. Entries without the capability are ignored.
    /// Re-indexing the identical pair is idempotent; a different handler
    /// for an already-mapped action is a conflict.
    pub fn index(&mut self, descriptor: &TypeDescriptor) -> Result<(), RoutingError> {
        let Some(Capability::HandlesAction { message, construct }) = descriptor.capability()
        else {
            return Ok(());
        };
        let handler = descriptor.described_type();

        if let Some(existing) = self.by_message.get(message) {
            if existing.handler_type() == handler {
                return Ok(());
            }
            return Err(RoutingError::DuplicateHandler {
                message: *message,
                existing: existing.handler_type(),
                rejected: handler,
            });
        }

        debug!(action = %message, handler = %handler, "action mapping indexed");
        let binding = HandlerBinding {
            handler,
            factory: construct.clone(),
        };
        self.by_message.insert(*message, binding.clone());
        self.by_handler.insert(handler, binding);
        Ok(())
    }

    /// Binding for one action type. Failing here is a routing-time miss,
    /// not a startup error: not every message type seen over the wire has
    /// a handler.
    pub fn lookup(&self, message: MessageType) -> Result<&HandlerBinding, RoutingError> {
        self.by_message
            .get(&message)
            .ok_or(RoutingError::NoHandlerForType { message })
    }

    /// Distinct handler bindings discovered so far, each exactly once.
    /// Lazy and restartable; order is unspecified.
    pub fn handlers(&self) -> impl Iterator<Item = &HandlerBinding> + '_ {
        self.by_handler.values()
    }

    /// Number of mapped action types.
    pub fn len(&self) -> usize {
        self.by_message.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_message.is_empty()
    }
}

/// Derives and serves the command → receiver mapping.
#[derive(Debug, Default)]
pub struct CommandIndexer {
    by_message: HashMap<MessageType, ReceiverBinding>,
    by_receiver: HashMap<MessageType, ReceiverBinding>,
}

impl CommandIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect one catalog entry and record the mapping when it describes
    /// a command receiver. Same conflict rules as the action indexer.
    pub fn index(&mut self, descriptor: &TypeDescriptor) -> Result<(), RoutingError> {
        let Some(Capability::ReceivesCommand { message, construct }) = descriptor.capability()
        else {
            return Ok(());
        };
        let receiver = descriptor.described_type();

        if let Some(existing) = self.by_message.get(message) {
            if existing.receiver_type() == receiver {
                return Ok(());
            }
            return Err(RoutingError::DuplicateReceiver {
                message: *message,
                existing: existing.receiver_type(),
                rejected: receiver,
            });
        }

        debug!(command = %message, receiver = %receiver, "command mapping indexed");
        let binding = ReceiverBinding {
            receiver,
            factory: construct.clone(),
        };
        self.by_message.insert(*message, binding.clone());
        self.by_receiver.insert(receiver, binding);
        Ok(())
    }

    /// Binding for one command type; routing-time miss when absent.
    pub fn lookup(&self, message: MessageType) -> Result<&ReceiverBinding, RoutingError> {
        self.by_message
            .get(&message)
            .ok_or(RoutingError::NoHandlerForType { message })
    }

    /// Distinct receiver bindings discovered so far, each exactly once.
    pub fn receivers(&self) -> impl Iterator<Item = &ReceiverBinding> + '_ {
        self.by_receiver.values()
    }

    pub fn len(&self) -> usize {
        self.by_message.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_message.is_empty()
    }
}
