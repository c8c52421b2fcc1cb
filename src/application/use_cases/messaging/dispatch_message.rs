//! Dispatch Message Use Case
//!
//! Routes a raw incoming message to the handler of its channel, if this node
//! is addressed by the message's filter.

use std::sync::Arc;

use crate::application::registries::{ChannelRegistry, NodeIdentity};
use crate::domain::gateways::IncomingMessage;
use crate::domain::models::envelope::{Envelope, ReceivedMessage};

/// What happened to an incoming message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Handed to the channel's handler
    Delivered,
    /// Addressed to another node
    Filtered,
    /// No channel with that name is registered here
    UnknownChannel,
    /// Missing the `"<filter>;"` prefix
    Malformed,
}

/// Use case for dispatching incoming messages
pub struct DispatchMessageUseCase {
    channels: Arc<ChannelRegistry>,
    identity: Arc<NodeIdentity>,
}

impl DispatchMessageUseCase {
    /// Create a new DispatchMessageUseCase
    #[must_use]
    pub fn new(channels: Arc<ChannelRegistry>, identity: Arc<NodeIdentity>) -> Self {
        Self { channels, identity }
    }

    /// Execute the use case
    pub fn execute(&self, incoming: &IncomingMessage) -> DispatchOutcome {
        let Some(envelope) = Envelope::decode(&incoming.payload) else {
            tracing::debug!(channel = %incoming.channel, "Dropping message without filter prefix");
            return DispatchOutcome::Malformed;
        };

        if !self.identity.accepts(&envelope.filter) {
            tracing::trace!(channel = %incoming.channel, filter = %envelope.filter, "Message filtered out");
            return DispatchOutcome::Filtered;
        }

        let Ok(channel) = self.channels.get_from_name(&incoming.channel) else {
            tracing::debug!(channel = %incoming.channel, "Message on unregistered channel");
            return DispatchOutcome::UnknownChannel;
        };

        let message = ReceivedMessage {
            channel: incoming.channel.clone(),
            filter: envelope.filter,
            payload: envelope.payload,
            raw: incoming.payload.clone(),
        };
        channel.deliver(&message);

        tracing::debug!(channel = %message.channel, filter = %message.filter, "Message delivered");
        DispatchOutcome::Delivered
    }
}
