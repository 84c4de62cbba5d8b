//! In-process loopback wiring.
//!
//! For single-process deployments with no remote peer: the client's
//! outgoing action queue feeds the server's incoming action queue directly,
//! and the server's outgoing command queue feeds the client's incoming
//! command queue. Delivery is synchronous — when a push or send returns,
//! the identical message (pointer-equal `Arc`) is already observable on the
//! incoming side, exactly once, in order. Do not combine this wiring with a
//! real transport in the same direction.

use tracing::trace;

use crate::config::QueueConfig;
use crate::error::TransportError;
use crate::queue::{queue, IncomingActions, IncomingCommands, OutgoingActions, OutgoingCommands};
use crate::transport::{Network, Outbound};

/// The four queue endpoints of a single-process deployment.
///
/// `outgoing_actions` and `incoming_actions` are two ends of the same
/// channel, as are the command pair.
#[derive(Debug)]
pub struct LoopbackQueues {
    /// Client-side sender; pushes land in `incoming_actions`.
    pub outgoing_actions: OutgoingActions,
    /// Server-side receiver.
    pub incoming_actions: IncomingActions,
    /// Server-side sender; pushes land in `incoming_commands`.
    pub outgoing_commands: OutgoingCommands,
    /// Client-side receiver.
    pub incoming_commands: IncomingCommands,
}

/// Build the loopback queue wiring.
pub fn loopback_queues(config: &QueueConfig) -> LoopbackQueues {
    let (outgoing_actions, incoming_actions) = queue(config.action_capacity);
    let (outgoing_commands, incoming_commands) = queue(config.command_capacity);
    LoopbackQueues {
        outgoing_actions,
        incoming_actions,
        outgoing_commands,
        incoming_commands,
    }
}

/// Loopback transport: every sent message is delivered to the local
/// process, synchronously, before `send` returns.
#[derive(Debug, Clone)]
pub struct LoopbackNetwork {
    actions: OutgoingActions,
    commands: OutgoingCommands,
}

impl LoopbackNetwork {
    /// A loopback delivering into the given local queue senders.
    pub fn new(actions: OutgoingActions, commands: OutgoingCommands) -> Self {
        Self { actions, commands }
    }
}

impl Network for LoopbackNetwork {
    fn send(&self, outbound: Outbound) -> Result<(), TransportError> {
        match outbound {
            Outbound::Action(action) => {
                trace!(action = %action.message_type(), "loopback action delivered");
                self.actions.push(action)
            }
            Outbound::Command(command) => {
                trace!(command = %command.message_type(), "loopback command delivered");
                self.commands.push(command)
            }
        }
    }
}
