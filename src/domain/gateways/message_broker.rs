//! Message Broker Gateway
//!
//! Abstract trait defining the contract for the pub/sub transport.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::shared::errors::BrokerError;

/// A raw message received from the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub channel: String,
    pub payload: String,
}

/// Pub/sub transport trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageBroker: Send + Sync {
    /// Publish a wire message on a channel
    async fn publish(&self, channel: &str, message: &str) -> Result<(), BrokerError>;

    /// Subscribe to the given channels
    ///
    /// A broker holds at most one subscription; subscribing again replaces
    /// the previous one and closes its receiver.
    async fn subscribe(
        &self,
        channels: &[String],
    ) -> Result<mpsc::Receiver<IncomingMessage>, BrokerError>;

    /// Drop the subscription and release connections
    async fn close(&self) -> Result<(), BrokerError>;
}
