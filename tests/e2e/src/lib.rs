//! Shared fixtures for the end-to-end pipeline tests.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use types::{Action, ActionHandler, Command, CommandReceiver, MessageType, Processable};

/// Install the test log subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    tracing::debug!("test subscriber ready");
}

/// Client intent: move to a grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub x: i32,
    pub y: i32,
}

impl Processable for Move {
    fn message_type(&self) -> MessageType {
        MessageType::of::<Move>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Action for Move {}

/// Client intent with no handler anywhere; used to exercise routing misses.
#[derive(Debug)]
pub struct Unknown;

impl Processable for Unknown {
    fn message_type(&self) -> MessageType {
        MessageType::of::<Unknown>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Action for Unknown {}

/// Server directive confirming an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveConfirmed {
    pub x: i32,
    pub y: i32,
}

impl Processable for MoveConfirmed {
    fn message_type(&self) -> MessageType {
        MessageType::of::<MoveConfirmed>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Command for MoveConfirmed {}

/// Shared log of everything a handler or receiver saw.
pub type Recorded<T> = Arc<Mutex<Vec<T>>>;

/// Records every move it handles and confirms it to the client.
pub struct MoveHandler {
    pub handled: Recorded<Move>,
}

#[async_trait]
impl ActionHandler for MoveHandler {
    type Action = Move;

    async fn handle(&self, action: &Move) -> anyhow::Result<Option<Arc<dyn Command>>> {
        self.handled.lock().push(action.clone());
        Ok(Some(Arc::new(MoveConfirmed {
            x: action.x,
            y: action.y,
        })))
    }
}

/// Records every confirmation the client receives.
pub struct MoveConfirmedReceiver {
    pub received: Recorded<MoveConfirmed>,
}

#[async_trait]
impl CommandReceiver for MoveConfirmedReceiver {
    type Command = MoveConfirmed;

    async fn receive(&self, command: &MoveConfirmed) -> anyhow::Result<Option<Arc<dyn Action>>> {
        self.received.lock().push(command.clone());
        Ok(None)
    }
}
