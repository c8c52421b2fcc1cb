//! Responder Registry
//!
//! Keyed callbacks that answer incoming data requests.

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

/// Callback turning request data into response data
pub type Responder = Arc<dyn Fn(Value) -> Value + Send + Sync>;

#[derive(Default)]
pub struct ResponderRegistry {
    responders: DashMap<String, Responder>,
}

impl ResponderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a responder, replacing any previous one for the key
    pub fn register(&self, key: impl Into<String>, responder: Responder) {
        let key = key.into();
        if self.responders.insert(key.clone(), responder).is_some() {
            tracing::debug!(key = %key, "Replaced existing data request responder");
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Responder> {
        self.responders.get(key).map(|entry| entry.value().clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.responders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responders.is_empty()
    }
}

impl std::fmt::Debug for ResponderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<String> = self.responders.iter().map(|e| e.key().clone()).collect();
        f.debug_struct("ResponderRegistry").field("keys", &keys).finish()
    }
}
