//! Common test utilities for multi-node tests
//!
//! Provides nodes sharing an in-memory bus or a real Redis container, plus a
//! recording channel handler.

use std::sync::Arc;
use std::time::Duration;

use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::redis::{Redis, REDIS_PORT};
use tokio::sync::mpsc;

use redis_messaging::{InMemoryBroker, MessagingSettings, ReceivedMessage, RedisApi};

/// How long tests wait for a message that should arrive
pub const RECEIVE_TIMEOUT: Duration = Duration::from_secs(2);

/// Test settings for a node
pub fn settings(filter_id: Option<&str>, request_timeout: Duration) -> MessagingSettings {
    MessagingSettings {
        filter_id: filter_id.map(str::to_string),
        request_timeout,
        ..MessagingSettings::default()
    }
}

/// Create a node attached to `bus`
#[allow(dead_code)]
pub fn node_on(bus: &InMemoryBroker, filter_id: Option<&str>) -> RedisApi {
    node_with_timeout(bus, filter_id, Duration::from_millis(500))
}

/// Create a node with a specific data request timeout
#[allow(dead_code)]
pub fn node_with_timeout(bus: &InMemoryBroker, filter_id: Option<&str>, request_timeout: Duration) -> RedisApi {
    RedisApi::with_broker(Arc::new(bus.peer()), settings(filter_id, request_timeout))
}

/// Messages captured by a recording handler
pub struct Inbox {
    rx: mpsc::UnboundedReceiver<ReceivedMessage>,
}

impl Inbox {
    /// Wait for the next message, panicking if none arrives in time
    pub async fn next(&mut self) -> ReceivedMessage {
        tokio::time::timeout(RECEIVE_TIMEOUT, self.rx.recv())
            .await
            .expect("timed out waiting for message")
            .expect("handler dropped")
    }
}

/// Register a channel whose handler records every delivery
pub fn record_channel(api: &RedisApi, name: &str) -> Inbox {
    let (tx, rx) = mpsc::unbounded_channel();
    api.register_channel(name, move |message: &ReceivedMessage| {
        let _ = tx.send(message.clone());
    })
    .expect("channel registration");
    Inbox { rx }
}

/// A disposable Redis server
#[allow(dead_code)]
pub struct TestRedis {
    pub uri: String,
    _container: ContainerAsync<Redis>,
}

#[allow(dead_code)]
impl TestRedis {
    /// Start a fresh Redis container
    pub async fn start() -> Self {
        let container = Redis::default()
            .with_tag("7-alpine")
            .start()
            .await
            .expect("Failed to start Redis container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container
            .get_host_port_ipv4(REDIS_PORT)
            .await
            .expect("Failed to get port");

        Self {
            uri: format!("redis://{host}:{port}"),
            _container: container,
        }
    }

    /// Connect a node to this server
    pub async fn node(&self, filter_id: Option<&str>) -> RedisApi {
        RedisApi::from_uri(&self.uri, settings(filter_id, Duration::from_secs(1)))
            .await
            .expect("Failed to connect node")
    }
}
