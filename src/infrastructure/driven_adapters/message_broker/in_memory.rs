//! In-Memory Message Broker
//!
//! Implements the MessageBroker trait over a tokio broadcast bus so several
//! nodes can exchange messages inside one process without Redis.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::domain::gateways::{IncomingMessage, MessageBroker};
use crate::shared::errors::BrokerError;

use super::redis_broker::SUBSCRIPTION_BUFFER;

const BUS_CAPACITY: usize = 4096;

/// Broker sharing a bus with its peers
pub struct InMemoryBroker {
    bus: broadcast::Sender<IncomingMessage>,
    subscription: Mutex<Option<JoinHandle<()>>>,
    closed: AtomicBool,
}

impl InMemoryBroker {
    /// Create a broker on a fresh bus
    #[must_use]
    pub fn new() -> Self {
        let (bus, _) = broadcast::channel(BUS_CAPACITY);
        Self::on_bus(bus)
    }

    /// Create another broker attached to the same bus
    #[must_use]
    pub fn peer(&self) -> Self {
        Self::on_bus(self.bus.clone())
    }

    fn on_bus(bus: broadcast::Sender<IncomingMessage>) -> Self {
        Self {
            bus,
            subscription: Mutex::new(None),
            closed: AtomicBool::new(false),
        }
    }
}

impl Default for InMemoryBroker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageBroker for InMemoryBroker {
    async fn publish(&self, channel: &str, message: &str) -> Result<(), BrokerError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(BrokerError::Closed);
        }

        // Like Redis, publishing with no subscribers is not an error
        let receivers = self
            .bus
            .send(IncomingMessage {
                channel: channel.to_string(),
                payload: message.to_string(),
            })
            .unwrap_or(0);

        tracing::trace!(channel = %channel, receivers, "Published to in-memory bus");
        Ok(())
    }

    async fn subscribe(
        &self,
        channels: &[String],
    ) -> Result<mpsc::Receiver<IncomingMessage>, BrokerError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(BrokerError::Closed);
        }

        let wanted: HashSet<String> = channels.iter().cloned().collect();
        let mut bus = self.bus.subscribe();
        let (tx, rx) = mpsc::channel(SUBSCRIPTION_BUFFER);

        let handle = tokio::spawn(async move {
            loop {
                match bus.recv().await {
                    Ok(message) => {
                        if wanted.contains(&message.channel) && tx.send(message).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "In-memory subscriber lagged behind");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        if let Some(previous) = self.subscription.lock().await.replace(handle) {
            previous.abort();
        }
        Ok(rx)
    }

    async fn close(&self) -> Result<(), BrokerError> {
        self.closed.store(true, Ordering::Release);
        if let Some(handle) = self.subscription.lock().await.take() {
            handle.abort();
        }
        Ok(())
    }
}
