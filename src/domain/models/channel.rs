//! Redis Channel Domain Model
//!
//! A named pub/sub channel together with the handler that receives its
//! messages.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::gateways::MessageHandler;
use crate::domain::models::envelope::ReceivedMessage;

/// Sentinel stored before the first delivery
const NEVER_RECEIVED: i64 = i64::MIN;

/// Handle to a registered channel, cheap to clone
#[derive(Clone)]
pub struct RedisChannel {
    name: String,
    handler: Arc<dyn MessageHandler>,
    last_received_millis: Arc<AtomicI64>,
}

impl RedisChannel {
    #[must_use]
    pub fn new(name: impl Into<String>, handler: Arc<dyn MessageHandler>) -> Self {
        Self {
            name: name.into(),
            handler,
            last_received_millis: Arc::new(AtomicI64::new(NEVER_RECEIVED)),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// When this channel last delivered a message, if ever
    #[must_use]
    pub fn last_received_at(&self) -> Option<DateTime<Utc>> {
        match self.last_received_millis.load(Ordering::Acquire) {
            NEVER_RECEIVED => None,
            millis => DateTime::from_timestamp_millis(millis),
        }
    }

    /// Stamp the receive time and hand the message to the handler
    pub fn deliver(&self, message: &ReceivedMessage) {
        self.last_received_millis
            .store(Utc::now().timestamp_millis(), Ordering::Release);
        self.handler.on_message(message);
    }
}

impl std::fmt::Debug for RedisChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisChannel")
            .field("name", &self.name)
            .field("last_received_at", &self.last_received_at())
            .finish_non_exhaustive()
    }
}
