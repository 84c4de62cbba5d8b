//! Composition of the routing pipeline.
//!
//! The startup phase, run once on a single thread: feed descriptor batches
//! into the catalog, index every entry, instantiate each discovered handler
//! and receiver exactly once, register the shared contracts, wire the
//! queues, and hand back the processors. Indexing conflicts abort
//! composition — a duplicate mapping is a structural defect, not a
//! transient condition.

use std::sync::Arc;

use network::{loopback_queues, LoopbackNetwork, OutgoingActions, OutgoingCommands, QueueConfig};
use routing::{ActionIndexer, CommandIndexer, Registry, RoutingError, TypeCatalog};
use tracing::info;
use types::TypeDescriptor;

use crate::processor::{ClientProcessor, ServerProcessor};

/// Builder for a routed pipeline.
#[derive(Debug, Default)]
pub struct Composition {
    config: QueueConfig,
    catalog: TypeCatalog,
}

impl Composition {
    pub fn new(config: QueueConfig) -> Self {
        Self {
            config,
            catalog: TypeCatalog::new(),
        }
    }

    /// Feed one batch of type descriptors into the catalog. Repeatable;
    /// batches are deduplicated by type identity.
    pub fn add_types<I>(mut self, source: I) -> Self
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        self.catalog.add(source);
        self
    }

    /// Build the single-process pipeline: loopback queues, both
    /// processors, and a registry holding every discovered handler and
    /// receiver as a singleton.
    pub fn build_loopback(self) -> Result<LoopbackPipeline, RoutingError> {
        let Composition { config, catalog } = self;

        let mut action_indexer = ActionIndexer::new();
        let mut command_indexer = CommandIndexer::new();
        for entry in catalog.all_types() {
            action_indexer.index(entry)?;
            command_indexer.index(entry)?;
        }

        let mut registry = Registry::new();
        for binding in action_indexer.handlers() {
            registry.register_action_handler(binding.handler_type(), binding.construct());
        }
        for binding in command_indexer.receivers() {
            registry.register_command_receiver(binding.receiver_type(), binding.construct());
        }

        let queues = loopback_queues(&config);
        let catalog = Arc::new(catalog);
        let action_indexer = Arc::new(action_indexer);
        let command_indexer = Arc::new(command_indexer);
        registry.register_instance(Arc::clone(&catalog));
        registry.register_instance(Arc::clone(&action_indexer));
        registry.register_instance(Arc::clone(&command_indexer));
        registry.register_instance(Arc::new(queues.outgoing_actions.clone()));
        registry.register_instance(Arc::new(queues.outgoing_commands.clone()));
        let registry = Arc::new(registry);

        let server = ServerProcessor::new(
            queues.incoming_actions,
            queues.outgoing_commands.clone(),
            Arc::clone(&action_indexer),
            Arc::clone(&registry),
        );
        let client = ClientProcessor::new(
            queues.incoming_commands,
            queues.outgoing_actions.clone(),
            Arc::clone(&command_indexer),
            Arc::clone(&registry),
        );

        info!(
            known_types = catalog.len(),
            handlers = action_indexer.len(),
            receivers = command_indexer.len(),
            "pipeline composed"
        );

        Ok(LoopbackPipeline {
            server,
            client,
            outgoing_actions: queues.outgoing_actions,
            outgoing_commands: queues.outgoing_commands,
            registry,
        })
    }
}

/// A composed single-process pipeline.
pub struct LoopbackPipeline {
    /// Consumes actions, invokes handlers.
    pub server: ServerProcessor,
    /// Consumes commands, invokes receivers.
    pub client: ClientProcessor,
    /// Client-side entry point: push actions here.
    pub outgoing_actions: OutgoingActions,
    /// Server-side entry point: push commands here.
    pub outgoing_commands: OutgoingCommands,
    /// Shared singleton registry.
    pub registry: Arc<Registry>,
}

impl LoopbackPipeline {
    /// Loopback transport view over the same wiring, for callers that
    /// drive sends through the `Network` contract.
    pub fn network(&self) -> LoopbackNetwork {
        LoopbackNetwork::new(self.outgoing_actions.clone(), self.outgoing_commands.clone())
    }
}
