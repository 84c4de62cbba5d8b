//! Handler and receiver contracts with their type-erased adapters.
//!
//! Typed handlers bind to exactly one message type through an associated
//! type. The routing layer works with the erased forms, which downcast
//! internally; blanket impls lift every typed handler and receiver
//! automatically, so implementors never write the erasure by hand.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::message::{Action, Command, MessageType};

/// Server-side logic bound to exactly one action type.
#[async_trait]
pub trait ActionHandler: Send + Sync + 'static {
    /// The action this handler consumes.
    type Action: Action;

    /// Process one action, optionally answering with a command for the
    /// client.
    async fn handle(&self, action: &Self::Action) -> anyhow::Result<Option<Arc<dyn Command>>>;
}

/// Client-side logic bound to exactly one command type.
#[async_trait]
pub trait CommandReceiver: Send + Sync + 'static {
    /// The command this receiver consumes.
    type Command: Command;

    /// Process one command, optionally answering with an action for the
    /// server.
    async fn receive(&self, command: &Self::Command) -> anyhow::Result<Option<Arc<dyn Action>>>;
}

/// Object-safe form of [`ActionHandler`], as stored in the registry.
#[async_trait]
pub trait ErasedActionHandler: Send + Sync {
    /// Identity of the action type this handler consumes.
    fn action_type(&self) -> MessageType;

    /// Downcast and dispatch one action.
    async fn invoke(&self, action: &dyn Action) -> anyhow::Result<Option<Arc<dyn Command>>>;
}

#[async_trait]
impl<H: ActionHandler> ErasedActionHandler for H {
    fn action_type(&self) -> MessageType {
        MessageType::of::<H::Action>()
    }

    async fn invoke(&self, action: &dyn Action) -> anyhow::Result<Option<Arc<dyn Command>>> {
        let Some(action) = action.as_any().downcast_ref::<H::Action>() else {
            warn!(
                expected = %MessageType::of::<H::Action>(),
                got = %action.message_type(),
                "unexpected action type in erased handler"
            );
            anyhow::bail!(
                "handler expects {}, got {}",
                MessageType::of::<H::Action>(),
                action.message_type()
            );
        };
        self.handle(action).await
    }
}

/// Object-safe form of [`CommandReceiver`], as stored in the registry.
#[async_trait]
pub trait ErasedCommandReceiver: Send + Sync {
    /// Identity of the command type this receiver consumes.
    fn command_type(&self) -> MessageType;

    /// Downcast and dispatch one command.
    async fn invoke(&self, command: &dyn Command) -> anyhow::Result<Option<Arc<dyn Action>>>;
}

#[async_trait]
impl<R: CommandReceiver> ErasedCommandReceiver for R {
    fn command_type(&self) -> MessageType {
        MessageType::of::<R::Command>()
    }

    async fn invoke(&self, command: &dyn Command) -> anyhow::Result<Option<Arc<dyn Action>>> {
        let Some(command) = command.as_any().downcast_ref::<R::Command>() else {
            warn!(
                expected = %MessageType::of::<R::Command>(),
                got = %command.message_type(),
                "unexpected command type in erased receiver"
            );
            anyhow::bail!(
                "receiver expects {}, got {}",
                MessageType::of::<R::Command>(),
                command.message_type()
            );
        };
        self.receive(command).await
    }
}

/// Shared factory producing an erased handler instance.
pub type HandlerFactory = Arc<dyn Fn() -> Arc<dyn ErasedActionHandler> + Send + Sync>;

/// Shared factory producing an erased receiver instance.
pub type ReceiverFactory = Arc<dyn Fn() -> Arc<dyn ErasedCommandReceiver> + Send + Sync>;
