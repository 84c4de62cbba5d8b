//! Transportable message contracts.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a message, handler, or contract type.
///
/// Wraps the `TypeId` used for routing decisions and keeps the compiler's
/// type name for diagnostics. Equality and hashing are on the `TypeId`
/// alone.
#[derive(Clone, Copy)]
pub struct MessageType {
    id: TypeId,
    name: &'static str,
}

impl MessageType {
    /// Identity of a concrete type.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Type name as reported by the compiler.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Underlying `TypeId`.
    pub fn type_id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for MessageType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MessageType {}

impl Hash for MessageType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Debug for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageType({})", self.name)
    }
}

/// Unit transported between peers.
///
/// Immutable once created. Whichever queue currently holds a message owns
/// it; ownership transfers on dequeue and delivery.
pub trait Processable: fmt::Debug + Send + Sync + 'static {
    /// Routing identity of this message.
    fn message_type(&self) -> MessageType;

    /// Upcast for handler-side downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// Client intent, routed to the server side for handling.
pub trait Action: Processable {}

/// Server directive, routed to the client side for handling.
pub trait Command: Processable {}
