//! Data Request Domain Model
//!
//! Frames exchanged on the reserved data request channel, and the response
//! handed back to the requester.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::shared::errors::MessagingError;

/// Reserved channel carrying data request frames
pub const DATA_REQUEST_CHANNEL: &str = "internal-data-request";

/// Direction of a data stream frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StreamType {
    Request,
    Response,
}

/// A data request or response as sent on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataStreamFrame {
    pub id: Uuid,
    pub key: String,
    #[serde(default)]
    pub data: Value,
    /// Filter ID the response must be addressed to
    pub sender: String,
    pub stream: StreamType,
}

impl DataStreamFrame {
    /// Build a new request frame with a fresh id
    #[must_use]
    pub fn request(key: impl Into<String>, data: Value, sender: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            key: key.into(),
            data,
            sender: sender.into(),
            stream: StreamType::Request,
        }
    }

    /// Build the response frame answering this request
    #[must_use]
    pub fn respond(&self, data: Value, sender: impl Into<String>) -> Self {
        Self {
            id: self.id,
            key: self.key.clone(),
            data,
            sender: sender.into(),
            stream: StreamType::Response,
        }
    }

    /// # Errors
    ///
    /// Returns `MessagingError::Payload` if the text is not a valid frame.
    pub fn decode(payload: &str) -> Result<Self, MessagingError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// # Errors
    ///
    /// Returns `MessagingError::Payload` if serialization fails.
    pub fn encode(&self) -> Result<String, MessagingError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Result of a data request
#[derive(Debug, Clone, PartialEq)]
pub struct DataResponse {
    /// Response data, `None` if no responder answered in time
    pub data: Option<Value>,
    /// Time from sending the request to receiving the response (or giving up)
    pub latency: Duration,
}

impl DataResponse {
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.data.is_none()
    }
}
