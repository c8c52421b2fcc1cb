//! Pending Requests
//!
//! Data requests awaiting a response, keyed by request id.

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::oneshot;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct PendingRequests {
    waiting: DashMap<Uuid, oneshot::Sender<Value>>,
}

impl PendingRequests {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start waiting for a response to `id`
    pub fn register(&self, id: Uuid) -> oneshot::Receiver<Value> {
        let (tx, rx) = oneshot::channel();
        self.waiting.insert(id, tx);
        rx
    }

    /// Hand response data to the waiter, returning whether one existed
    pub fn complete(&self, id: &Uuid, data: Value) -> bool {
        match self.waiting.remove(id) {
            // The waiter may have given up between remove and send
            Some((_, tx)) => tx.send(data).is_ok(),
            None => false,
        }
    }

    pub fn remove(&self, id: &Uuid) {
        self.waiting.remove(id);
    }

    /// Drop every waiter; their receivers resolve as closed
    pub fn clear(&self) {
        self.waiting.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}
