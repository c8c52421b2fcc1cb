//! Error Types
//!
//! Messaging error types with stable error codes for logging and callers.

use std::time::Duration;

use thiserror::Error;

/// Broker-level errors for transport failures
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Broker is closed")]
    Closed,
}

/// Errors surfaced by the messaging API
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("Invalid Redis URI passed through; '{0}'")]
    InvalidUri(String),

    #[error("Could not connect to Redis: {0}")]
    CouldNotConnect(String),

    #[error("Redis URI conflicts with separately configured {0}")]
    ConflictingCredentials(&'static str),

    #[error("A channel already exists with this name '{0}'")]
    ChannelAlreadyRegistered(String),

    #[error("There is no channel registered with the name '{0}'")]
    ChannelNotRegistered(String),

    #[error("Invalid channel definition: {0}")]
    ChannelDefinition(String),

    #[error("Invalid filter ID '{0}'")]
    InvalidFilter(String),

    #[error("Failed to send message to redis on channel '{channel}'")]
    MessageFailure {
        channel: String,
        #[source]
        source: BrokerError,
    },

    #[error("Invalid message payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Message payload is not a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Broker(#[from] BrokerError),
}

impl MessagingError {
    /// Get the error code for this error
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidUri(_) => "INVALID_URI",
            Self::CouldNotConnect(_) => "CONNECTION_FAILED",
            Self::ConflictingCredentials(_) => "INVALID_CONFIG",
            Self::ChannelAlreadyRegistered(_) => "CHANNEL_CONFLICT",
            Self::ChannelNotRegistered(_) => "CHANNEL_NOT_FOUND",
            Self::ChannelDefinition(_) => "INVALID_CHANNEL",
            Self::InvalidFilter(_) => "INVALID_FILTER",
            Self::MessageFailure { .. } => "PUBLISH_FAILED",
            Self::Payload(_) | Self::NotAnObject => "INVALID_PAYLOAD",
            Self::Broker(BrokerError::Timeout(_)) => "TIMEOUT",
            Self::Broker(_) => "BROKER_ERROR",
        }
    }

    /// Whether retrying the same operation could succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::CouldNotConnect(_)
                | Self::MessageFailure { .. }
                | Self::Broker(BrokerError::Timeout(_) | BrokerError::Redis(_))
        )
    }
}
