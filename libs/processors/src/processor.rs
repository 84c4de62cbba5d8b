//! Client and server processors.

use std::sync::Arc;

use network::{IncomingActions, IncomingCommands, OutgoingActions, OutgoingCommands};
use routing::{ActionIndexer, CommandIndexer, Registry};
use tracing::{debug, error, info};
use types::{Action, Command, MessageType};
use uuid::Uuid;

use crate::error::ProcessError;
use crate::metrics::ProcessorMetrics;

/// Outcome of routing one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// Type of the message that was processed.
    pub message: MessageType,
    /// Handler or receiver type that was invoked.
    pub target: MessageType,
    /// Whether a response was pushed to the outgoing queue.
    pub responded: bool,
}

/// Consumes incoming actions, dispatches them to their handlers, and
/// forwards handler responses as outgoing commands.
pub struct ServerProcessor {
    id: String,
    incoming: IncomingActions,
    outgoing: OutgoingCommands,
    indexer: Arc<ActionIndexer>,
    registry: Arc<Registry>,
    metrics: Arc<ProcessorMetrics>,
}

impl ServerProcessor {
    pub fn new(
        incoming: IncomingActions,
        outgoing: OutgoingCommands,
        indexer: Arc<ActionIndexer>,
        registry: Arc<Registry>,
    ) -> Self {
        let id = format!("server-{}", Uuid::new_v4());
        debug!(processor = %id, "server processor created");
        Self {
            id,
            incoming,
            outgoing,
            indexer,
            registry,
            metrics: Arc::new(ProcessorMetrics::default()),
        }
    }

    /// Id used in log fields.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Metrics handle, shareable with monitoring code.
    pub fn metrics(&self) -> Arc<ProcessorMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Await and route one action. `None` once the incoming queue closes.
    pub async fn process_next(&mut self) -> Option<Result<Dispatch, ProcessError>> {
        let action = self.incoming.recv().await?;
        Some(self.route(action).await)
    }

    /// Route whatever is immediately available, without waiting for more.
    pub async fn process_pending(&mut self) -> Vec<Result<Dispatch, ProcessError>> {
        let mut results = Vec::new();
        while let Some(action) = self.incoming.try_recv() {
            results.push(self.route(action).await);
        }
        results
    }

    /// Consume the queue until it closes. Failures are logged per message
    /// and never terminate the loop.
    pub async fn run(&mut self) {
        info!(processor = %self.id, "server processor loop started");
        while let Some(result) = self.process_next().await {
            if let Err(e) = result {
                error!(processor = %self.id, error = %e, "action processing failed");
            }
        }
        info!(processor = %self.id, "server processor loop stopped");
    }

    async fn route(&self, action: Arc<dyn Action>) -> Result<Dispatch, ProcessError> {
        let result = self.dispatch(action.as_ref()).await;
        match &result {
            Ok(_) => self.metrics.record_processed(),
            Err(_) => self.metrics.record_failed(),
        }
        result
    }

    async fn dispatch(&self, action: &dyn Action) -> Result<Dispatch, ProcessError> {
        let message = action.message_type();
        let binding = self.indexer.lookup(message)?;
        let handler = self.registry.action_handler(binding.handler_type())?;

        let response = handler
            .invoke(action)
            .await
            .map_err(|source| ProcessError::Invocation { message, source })?;

        let responded = match response {
            Some(command) => {
                self.outgoing
                    .push(command)
                    .map_err(|source| ProcessError::Respond { message, source })?;
                self.metrics.record_response();
                true
            }
            None => false,
        };

        debug!(
            processor = %self.id,
            action = %message,
            handler = %binding.handler_type(),
            responded,
            "action dispatched"
        );
        Ok(Dispatch {
            message,
            target: binding.handler_type(),
            responded,
        })
    }
}

/// Consumes incoming commands, dispatches them to their receivers, and
/// forwards receiver responses as outgoing actions.
pub struct ClientProcessor {
    id: String,
    incoming: IncomingCommands,
    outgoing: OutgoingActions,
    indexer: Arc<CommandIndexer>,
    registry: Arc<Registry>,
    metrics: Arc<ProcessorMetrics>,
}

impl ClientProcessor {
    pub fn new(
        incoming: IncomingCommands,
        outgoing: OutgoingActions,
        indexer: Arc<CommandIndexer>,
        registry: Arc<Registry>,
    ) -> Self {
        let id = format!("client-{}", Uuid::new_v4());
        debug!(processor = %id, "client processor created");
        Self {
            id,
            incoming,
            outgoing,
            indexer,
            registry,
            metrics: Arc::new(ProcessorMetrics::default()),
        }
    }

    /// Id used in log fields.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Metrics handle, shareable with monitoring code.
    pub fn metrics(&self) -> Arc<ProcessorMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Await and route one command. `None` once the incoming queue closes.
    pub async fn process_next(&mut self) -> Option<Result<Dispatch, ProcessError>> {
        let command = self.incoming.recv().await?;
        Some(self.route(command).await)
    }

    /// Route whatever is immediately available, without waiting for more.
    pub async fn process_pending(&mut self) -> Vec<Result<Dispatch, ProcessError>> {
        let mut results = Vec::new();
        while let Some(command) = self.incoming.try_recv() {
            results.push(self.route(command).await);
        }
        results
    }

    /// Consume the queue until it closes. Failures are logged per message
    /// and never terminate the loop.
    pub async fn run(&mut self) {
        info!(processor = %self.id, "client processor loop started");
        while let Some(result) = self.process_next().await {
            if let Err(e) = result {
                error!(processor = %self.id, error = %e, "command processing failed");
            }
        }
        info!(processor = %self.id, "client processor loop stopped");
    }

    async fn route(&self, command: Arc<dyn Command>) -> Result<Dispatch, ProcessError> {
        let result = self.dispatch(command.as_ref()).await;
        match &result {
            Ok(_) => self.metrics.record_processed(),
            Err(_) => self.metrics.record_failed(),
        }
        result
    }

    async fn dispatch(&self, command: &dyn Command) -> Result<Dispatch, ProcessError> {
        let message = command.message_type();
        let binding = self.indexer.lookup(message)?;
        let receiver = self.registry.command_receiver(binding.receiver_type())?;

        let response = receiver
            .invoke(command)
            .await
            .map_err(|source| ProcessError::Invocation { message, source })?;

        let responded = match response {
            Some(action) => {
                self.outgoing
                    .push(action)
                    .map_err(|source| ProcessError::Respond { message, source })?;
                self.metrics.record_response();
                true
            }
            None => false,
        };

        debug!(
            processor = %self.id,
            command = %message,
            receiver = %binding.receiver_type(),
            responded,
            "command dispatched"
        );
        Ok(Dispatch {
            message,
            target: binding.receiver_type(),
            responded,
        })
    }
}
