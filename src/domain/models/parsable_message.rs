//! Parsable Message
//!
//! Wraps a JSON object so messages can be sent over Redis as structured data
//! rather than raw strings.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::shared::errors::MessagingError;

/// A JSON object message
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsableMessage {
    json: Map<String, Value>,
}

impl ParsableMessage {
    #[must_use]
    pub fn from_map(json: Map<String, Value>) -> Self {
        Self { json }
    }

    /// Build from any JSON value that is an object
    ///
    /// # Errors
    ///
    /// Returns `MessagingError::NotAnObject` for arrays, scalars and null.
    pub fn from_value(value: Value) -> Result<Self, MessagingError> {
        match value {
            Value::Object(json) => Ok(Self { json }),
            _ => Err(MessagingError::NotAnObject),
        }
    }

    /// Parse from raw wire text, stripping a `"<filter>;"` prefix if present
    ///
    /// # Errors
    ///
    /// Returns `MessagingError::Payload` if the body is not valid JSON, or
    /// `MessagingError::NotAnObject` if it is not a JSON object.
    pub fn parse(raw: &str) -> Result<Self, MessagingError> {
        let body = if raw.trim_start().starts_with('{') {
            raw
        } else {
            raw.split_once(';').map_or(raw, |(_, rest)| rest)
        };
        Self::from_value(serde_json::from_str(body)?)
    }

    /// Compact JSON text for publishing
    #[must_use]
    pub fn format_for_send(&self) -> String {
        Value::Object(self.json.clone()).to_string()
    }

    #[must_use]
    pub fn json(&self) -> &Map<String, Value> {
        &self.json
    }

    #[must_use]
    pub fn into_json(self) -> Map<String, Value> {
        self.json
    }

    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.json.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.json.insert(key.into(), value.into());
        self
    }

    /// Typed lookup, falling back to `default` when missing or mistyped
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.json
            .get(key)
            .and_then(|value| T::deserialize(value).ok())
            .unwrap_or(default)
    }

    #[must_use]
    pub fn get_uuid(&self, key: &str) -> Option<Uuid> {
        self.json
            .get(key)
            .and_then(Value::as_str)
            .and_then(|s| Uuid::parse_str(s).ok())
    }

    #[must_use]
    pub fn get_json_array(&self, key: &str) -> Vec<Value> {
        self.json
            .get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    /// Array elements as strings; non-string elements use their JSON text
    #[must_use]
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.get_json_array(key)
            .into_iter()
            .map(|value| match value {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect()
    }

    #[must_use]
    pub fn get_bool(&self, key: &str) -> bool {
        self.json.get(key).and_then(Value::as_bool).unwrap_or(false)
    }
}

impl From<Map<String, Value>> for ParsableMessage {
    fn from(json: Map<String, Value>) -> Self {
        Self::from_map(json)
    }
}

impl std::fmt::Display for ParsableMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_for_send())
    }
}
