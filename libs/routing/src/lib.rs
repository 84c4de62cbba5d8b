//! Discovery and routing tables.
//!
//! ```text
//! descriptors ──> TypeCatalog ──> ActionIndexer / CommandIndexer ──> Registry
//!                 (known types)   (message → handler mappings)       (singletons)
//! ```
//!
//! The catalog ingests explicit type descriptors, the indexers derive the
//! unique message-type → handler-type mappings from them, and the registry
//! holds the singleton instances the processors resolve at dispatch time.
//! All three are populated once during composition, on a single thread, and
//! read-only afterwards — lookups are safe for concurrent readers.

pub mod catalog;
pub mod error;
pub mod index;
pub mod registry;

pub use catalog::TypeCatalog;
pub use error::RoutingError;
pub use index::{ActionIndexer, CommandIndexer, HandlerBinding, ReceiverBinding};
pub use registry::Registry;

/// Result type alias for routing operations.
pub type Result<T> = std::result::Result<T, RoutingError>;
