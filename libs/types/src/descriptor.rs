//! Explicit type registration.
//!
//! A [`TypeDescriptor`] is one entry of the metadata catalog: the identity
//! of a known type plus the routing capability it contributes, if any.
//! Descriptor batches are enumerated by the integrator (or generated at
//! build time); there is no runtime type scanning.

use std::fmt;
use std::sync::Arc;

use crate::handler::{
    ActionHandler, CommandReceiver, ErasedActionHandler, ErasedCommandReceiver, HandlerFactory,
    ReceiverFactory,
};
use crate::message::MessageType;

/// What a described type contributes to the routing tables.
#[derive(Clone)]
pub enum Capability {
    /// The type handles one action type on the server side.
    HandlesAction {
        /// Action type the handler consumes.
        message: MessageType,
        /// Factory for the erased handler singleton.
        construct: HandlerFactory,
    },
    /// The type receives one command type on the client side.
    ReceivesCommand {
        /// Command type the receiver consumes.
        message: MessageType,
        /// Factory for the erased receiver singleton.
        construct: ReceiverFactory,
    },
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::HandlesAction { message, .. } => f
                .debug_struct("HandlesAction")
                .field("message", message)
                .finish_non_exhaustive(),
            Capability::ReceivesCommand { message, .. } => f
                .debug_struct("ReceivesCommand")
                .field("message", message)
                .finish_non_exhaustive(),
        }
    }
}

/// One catalog entry: a known type and its derivable routing facts.
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    ty: MessageType,
    capability: Option<Capability>,
}

impl TypeDescriptor {
    /// Describe a type with no routing capability.
    pub fn plain<T: 'static>() -> Self {
        Self {
            ty: MessageType::of::<T>(),
            capability: None,
        }
    }

    /// Describe an action handler constructed via `Default`.
    pub fn action_handler<H>() -> Self
    where
        H: ActionHandler + Default,
    {
        Self::action_handler_with(H::default)
    }

    /// Describe an action handler with an explicit constructor, for
    /// handlers that capture dependencies.
    pub fn action_handler_with<H, F>(construct: F) -> Self
    where
        H: ActionHandler,
        F: Fn() -> H + Send + Sync + 'static,
    {
        Self {
            ty: MessageType::of::<H>(),
            capability: Some(Capability::HandlesAction {
                message: MessageType::of::<H::Action>(),
                construct: Arc::new(move || Arc::new(construct()) as Arc<dyn ErasedActionHandler>),
            }),
        }
    }

    /// Describe a command receiver constructed via `Default`.
    pub fn command_receiver<R>() -> Self
    where
        R: CommandReceiver + Default,
    {
        Self::command_receiver_with(R::default)
    }

    /// Describe a command receiver with an explicit constructor.
    pub fn command_receiver_with<R, F>(construct: F) -> Self
    where
        R: CommandReceiver,
        F: Fn() -> R + Send + Sync + 'static,
    {
        Self {
            ty: MessageType::of::<R>(),
            capability: Some(Capability::ReceivesCommand {
                message: MessageType::of::<R::Command>(),
                construct: Arc::new(move || Arc::new(construct()) as Arc<dyn ErasedCommandReceiver>),
            }),
        }
    }

    /// Identity of the described type.
    pub fn described_type(&self) -> MessageType {
        self.ty
    }

    /// Routing capability, if any.
    pub fn capability(&self) -> Option<&Capability> {
        self.capability.as_ref()
    }
}
