//! Publish Message Use Case
//!
//! Wraps a message in its filter envelope and publishes it on a channel.

use std::sync::Arc;

use crate::domain::gateways::MessageBroker;
use crate::domain::models::envelope::{Envelope, Filter};
use crate::shared::errors::MessagingError;

/// Use case for publishing a message
pub struct PublishMessageUseCase {
    broker: Arc<dyn MessageBroker>,
}

impl PublishMessageUseCase {
    /// Create a new PublishMessageUseCase
    #[must_use]
    pub fn new(broker: Arc<dyn MessageBroker>) -> Self {
        Self { broker }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `MessagingError::InvalidFilter` if the filter cannot be encoded
    /// and `MessagingError::MessageFailure` if the broker rejects the publish.
    pub async fn execute(
        &self,
        channel: &str,
        filter: &Filter,
        message: &str,
    ) -> Result<(), MessagingError> {
        filter.validate()?;
        let wire = Envelope::new(filter.clone(), message).encode();
        tracing::debug!(channel = %channel, filter = %filter, bytes = wire.len(), "Publishing message");

        self.broker.publish(channel, &wire).await.map_err(|source| {
            tracing::warn!(channel = %channel, error = %source, "Failed to publish message");
            MessagingError::MessageFailure {
                channel: channel.to_string(),
                source,
            }
        })
    }
}
