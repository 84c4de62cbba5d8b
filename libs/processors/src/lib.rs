//! Message processors and composition wiring.
//!
//! ```text
//!                  ┌───────────────────┐
//!  IncomingActions │  ServerProcessor  │ OutgoingCommands
//!  ───────────────>│ lookup → resolve  │────────────────>
//!                  │      → invoke     │
//!                  └───────────────────┘
//!                  ┌───────────────────┐
//! IncomingCommands │  ClientProcessor  │ OutgoingActions
//!  ───────────────>│ lookup → resolve  │────────────────>
//!                  │      → invoke     │
//!                  └───────────────────┘
//! ```
//!
//! Each processor consumes one queue, routes every message through its
//! indexer and the registry, invokes the resolved handler or receiver, and
//! pushes the optional response to its outgoing queue. Routing failures are
//! per-message: reported to the caller (or logged by the run loop) while
//! the pipeline keeps going. There is no automatic retry; re-enqueueing is
//! the integrator's call.
//!
//! The `compose` module performs the startup phase for a single-process
//! deployment: catalog → indexers → singleton registration → loopback
//! queues → processors.

pub mod compose;
pub mod error;
pub mod metrics;
pub mod processor;

pub use compose::{Composition, LoopbackPipeline};
pub use error::ProcessError;
pub use metrics::{ProcessorMetrics, ProcessorStats};
pub use processor::{ClientProcessor, Dispatch, ServerProcessor};
