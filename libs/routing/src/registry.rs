//! Singleton instance registry.
//!
//! The resolver of the pipeline: an explicit object built during
//! composition and shared read-only afterwards, never ambient global state.
//! Arbitrary contracts are stored behind `Any` and recovered by downcast;
//! handler and receiver instances are stored in their erased form, because
//! a trait object cannot be recovered from `dyn Any` and the processors
//! only know handler types by identity.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};
use types::{ErasedActionHandler, ErasedCommandReceiver, MessageType};

use crate::error::RoutingError;

/// Holds the singleton instance for every registered contract.
///
/// Resolution returns the same `Arc` on every call. A missing registration
/// is an [`RoutingError::UnregisteredContract`] error, never a silent
/// default.
#[derive(Default)]
pub struct Registry {
    instances: HashMap<MessageType, Arc<dyn Any + Send + Sync>>,
    action_handlers: HashMap<MessageType, Arc<dyn ErasedActionHandler>>,
    command_receivers: HashMap<MessageType, Arc<dyn ErasedCommandReceiver>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the singleton instance for contract `T`. Replaces any
    /// previous registration; the composition layer is expected to register
    /// each contract once.
    pub fn register_instance<T: Send + Sync + 'static>(&mut self, instance: Arc<T>) {
        let contract = MessageType::of::<T>();
        if self.instances.insert(contract, instance).is_some() {
            warn!(contract = %contract, "contract registration replaced");
        } else {
            debug!(contract = %contract, "contract registered");
        }
    }

    /// Resolve the singleton for contract `T`.
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, RoutingError> {
        let contract = MessageType::of::<T>();
        let instance = self
            .instances
            .get(&contract)
            .ok_or(RoutingError::UnregisteredContract { contract })?;
        Arc::clone(instance)
            .downcast::<T>()
            .map_err(|_| RoutingError::UnregisteredContract { contract })
    }

    /// Whether contract `T` has a registration.
    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.instances.contains_key(&MessageType::of::<T>())
    }

    /// Register the erased handler singleton for a handler type.
    pub fn register_action_handler(
        &mut self,
        handler_type: MessageType,
        handler: Arc<dyn ErasedActionHandler>,
    ) {
        if self.action_handlers.insert(handler_type, handler).is_some() {
            warn!(handler = %handler_type, "action handler registration replaced");
        } else {
            debug!(handler = %handler_type, "action handler registered");
        }
    }

    /// Resolve the erased handler singleton for a handler type.
    pub fn action_handler(
        &self,
        handler_type: MessageType,
    ) -> Result<Arc<dyn ErasedActionHandler>, RoutingError> {
        self.action_handlers
            .get(&handler_type)
            .cloned()
            .ok_or(RoutingError::UnregisteredContract {
                contract: handler_type,
            })
    }

    /// Register the erased receiver singleton for a receiver type.
    pub fn register_command_receiver(
        &mut self,
        receiver_type: MessageType,
        receiver: Arc<dyn ErasedCommandReceiver>,
    ) {
        if self
            .command_receivers
            .insert(receiver_type, receiver)
            .is_some()
        {
            warn!(receiver = %receiver_type, "command receiver registration replaced");
        } else {
            debug!(receiver = %receiver_type, "command receiver registered");
        }
    }

    /// Resolve the erased receiver singleton for a receiver type.
    pub fn command_receiver(
        &self,
        receiver_type: MessageType,
    ) -> Result<Arc<dyn ErasedCommandReceiver>, RoutingError> {
        self.command_receivers
            .get(&receiver_type)
            .cloned()
            .ok_or(RoutingError::UnregisteredContract {
                contract: receiver_type,
            })
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("instances", &self.instances.len())
            .field("action_handlers", &self.action_handlers.len())
            .field("command_receivers", &self.command_receivers.len())
            .finish()
    }
}
