//! Message identity and routing contracts.
//!
//! Defines the transportable message traits ([`Processable`], [`Action`],
//! [`Command`]), the handler contracts ([`ActionHandler`],
//! [`CommandReceiver`]) with their type-erased adapters, and
//! [`TypeDescriptor`] — the explicit registration unit the catalog and
//! indexers consume.
//!
//! Messages travel as `Arc<dyn Action>` / `Arc<dyn Command>` through queues;
//! ownership transfers on hand-off, so nothing here is mutated after
//! construction.

pub mod descriptor;
pub mod handler;
pub mod message;

pub use descriptor::{Capability, TypeDescriptor};
pub use handler::{
    ActionHandler, CommandReceiver, ErasedActionHandler, ErasedCommandReceiver, HandlerFactory,
    ReceiverFactory,
};
pub use message::{Action, Command, MessageType, Processable};
