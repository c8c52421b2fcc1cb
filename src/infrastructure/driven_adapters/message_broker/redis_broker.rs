//! Redis Message Broker Implementation
//!
//! Implements the MessageBroker trait with one multiplexed connection for
//! publishing and one dedicated pub/sub connection per subscription.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use redis::aio::{MultiplexedConnection, PubSub};
use redis::AsyncCommands;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::domain::gateways::{IncomingMessage, MessageBroker};
use crate::domain::models::credentials::RedisCredentials;
use crate::infrastructure::driven_adapters::connection::create_client;
use crate::shared::errors::{BrokerError, MessagingError};

/// Capacity of the queue between the subscriber and the listener
pub const SUBSCRIPTION_BUFFER: usize = 1024;

/// Redis implementation of MessageBroker
pub struct RedisBroker {
    client: redis::Client,
    connection: MultiplexedConnection,
    timeout: Duration,
    subscription: Mutex<Option<JoinHandle<()>>>,
    closed: AtomicBool,
}

impl RedisBroker {
    /// Connect to Redis with the given credentials
    ///
    /// # Errors
    ///
    /// Returns `MessagingError::CouldNotConnect` if the server is unreachable
    /// or rejects the credentials.
    pub async fn connect(credentials: &RedisCredentials, timeout: Duration) -> Result<Self, MessagingError> {
        let (client, connection) = create_client(credentials, timeout).await?;
        tracing::info!(host = %credentials.host(), port = credentials.port(), ssl = credentials.ssl(), "Connected to Redis");

        Ok(Self {
            client,
            connection,
            timeout,
            subscription: Mutex::new(None),
            closed: AtomicBool::new(false),
        })
    }

    fn ensure_open(&self) -> Result<(), BrokerError> {
        if self.closed.load(Ordering::Acquire) {
            Err(BrokerError::Closed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MessageBroker for RedisBroker {
    async fn publish(&self, channel: &str, message: &str) -> Result<(), BrokerError> {
        self.ensure_open()?;

        let mut connection = self.connection.clone();
        let receivers = tokio::time::timeout(
            self.timeout,
            connection.publish::<_, _, i64>(channel, message),
        )
        .await
        .map_err(|_| BrokerError::Timeout(self.timeout))??;

        tracing::trace!(channel = %channel, receivers, "Published to Redis");
        Ok(())
    }

    async fn subscribe(
        &self,
        channels: &[String],
    ) -> Result<mpsc::Receiver<IncomingMessage>, BrokerError> {
        self.ensure_open()?;

        let mut pubsub = tokio::time::timeout(self.timeout, self.client.get_async_pubsub())
            .await
            .map_err(|_| BrokerError::Timeout(self.timeout))??;
        if !channels.is_empty() {
            pubsub.subscribe(channels).await?;
        }

        let (tx, rx) = mpsc::channel(SUBSCRIPTION_BUFFER);
        let handle = tokio::spawn(forward_messages(pubsub, tx));

        if let Some(previous) = self.subscription.lock().await.replace(handle) {
            previous.abort();
        }

        tracing::debug!(channels = ?channels, "Subscribed to Redis channels");
        Ok(rx)
    }

    async fn close(&self) -> Result<(), BrokerError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        if let Some(handle) = self.subscription.lock().await.take() {
            handle.abort();
        }
        tracing::info!("Redis broker closed");
        Ok(())
    }
}

/// Pump pub/sub messages into the listener queue until either side goes away
///
/// `close` and resubscription abort this task, so reaching the end of the
/// stream means the pub/sub connection was lost.
async fn forward_messages(pubsub: PubSub, tx: mpsc::Sender<IncomingMessage>) {
    let mut messages = std::pin::pin!(pubsub.into_on_message());

    while let Some(message) = messages.next().await {
        let payload: String = match message.get_payload() {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(channel = %message.get_channel_name(), error = %error, "Skipping non-text message");
                continue;
            }
        };

        let incoming = IncomingMessage {
            channel: message.get_channel_name().to_string(),
            payload,
        };
        if tx.send(incoming).await.is_err() {
            tracing::debug!("Listener gone, ending Redis subscription");
            return;
        }
    }

    tracing::warn!("Redis subscription connection lost; listeners stop until start_listeners is called again");
}
