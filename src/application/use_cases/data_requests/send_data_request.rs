//! Send Data Request Use Case
//!
//! Publishes a keyed data request and waits a bounded time for the answer.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::application::registries::{NodeIdentity, PendingRequests};
use crate::application::use_cases::messaging::PublishMessageUseCase;
use crate::domain::models::data_request::{DataResponse, DataStreamFrame, DATA_REQUEST_CHANNEL};
use crate::domain::models::envelope::Filter;
use crate::shared::errors::MessagingError;

/// Use case for requesting data from other nodes
pub struct SendDataRequestUseCase {
    publisher: Arc<PublishMessageUseCase>,
    pending: Arc<PendingRequests>,
    identity: Arc<NodeIdentity>,
    timeout: Duration,
}

impl SendDataRequestUseCase {
    /// Create a new SendDataRequestUseCase
    #[must_use]
    pub fn new(
        publisher: Arc<PublishMessageUseCase>,
        pending: Arc<PendingRequests>,
        identity: Arc<NodeIdentity>,
        timeout: Duration,
    ) -> Self {
        Self {
            publisher,
            pending,
            identity,
            timeout,
        }
    }

    /// Execute the use case
    ///
    /// A request nobody answers within the timeout yields a response with
    /// no data rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `MessagingError::MessageFailure` if the request cannot be published.
    pub async fn execute(
        &self,
        target: &Filter,
        key: &str,
        data: Value,
    ) -> Result<DataResponse, MessagingError> {
        let frame = DataStreamFrame::request(key, data, self.identity.reply_filter());
        let id = frame.id;
        let payload = frame.encode()?;

        tracing::debug!(request_id = %id, key = %key, target = %target, "Sending data request");

        let start = Instant::now();
        let receiver = self.pending.register(id);

        if let Err(error) = self.publisher.execute(DATA_REQUEST_CHANNEL, target, &payload).await {
            self.pending.remove(&id);
            return Err(error);
        }

        let data = match tokio::time::timeout(self.timeout, receiver).await {
            Ok(Ok(data)) => Some(data),
            Ok(Err(_)) => {
                tracing::debug!(request_id = %id, "Data request abandoned");
                None
            }
            Err(_) => {
                tracing::warn!(request_id = %id, key = %key, timeout = ?self.timeout, "Data request timed out");
                None
            }
        };
        self.pending.remove(&id);

        let latency = start.elapsed();
        tracing::debug!(request_id = %id, latency = ?latency, answered = data.is_some(), "Data request finished");

        Ok(DataResponse { data, latency })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::{IncomingMessage, MessageBroker};
    use crate::domain::models::envelope::Envelope;
    use crate::shared::errors::BrokerError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    /// Broker that answers every published request through `pending`
    struct AnsweringBroker {
        pending: Arc<PendingRequests>,
        answer: Option<Value>,
        published: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl MessageBroker for AnsweringBroker {
        async fn publish(&self, channel: &str, message: &str) -> Result<(), BrokerError> {
            if self.fail {
                return Err(BrokerError::Closed);
            }
            self.published
                .lock()
                .unwrap()
                .push((channel.to_string(), message.to_string()));

            if let Some(answer) = &self.answer {
                let envelope = Envelope::decode(message).unwrap();
                let frame = DataStreamFrame::decode(&envelope.payload).unwrap();
                self.pending.complete(&frame.id, answer.clone());
            }
            Ok(())
        }

        async fn subscribe(
            &self,
            _channels: &[String],
        ) -> Result<mpsc::Receiver<IncomingMessage>, BrokerError> {
            Err(BrokerError::Closed)
        }

        async fn close(&self) -> Result<(), BrokerError> {
            Ok(())
        }
    }

    fn setup(answer: Option<Value>, fail: bool) -> (SendDataRequestUseCase, Arc<AnsweringBroker>, Arc<PendingRequests>) {
        let pending = Arc::new(PendingRequests::new());
        let broker = Arc::new(AnsweringBroker {
            pending: pending.clone(),
            answer,
            published: Mutex::new(Vec::new()),
            fail,
        });
        let publisher = Arc::new(PublishMessageUseCase::new(broker.clone()));
        let identity = Arc::new(NodeIdentity::new(Some("proxy".to_string())));
        let use_case = SendDataRequestUseCase::new(publisher, pending.clone(), identity, Duration::from_millis(50));
        (use_case, broker, pending)
    }

    #[tokio::test]
    async fn should_return_answer_when_responder_replies() {
        let (use_case, broker, pending) = setup(Some(json!({"players": 42})), false);

        let response = use_case
            .execute(&Filter::Id("lobby-1".to_string()), "player-count", json!({}))
            .await
            .unwrap();

        assert_eq!(response.data, Some(json!({"players": 42})));
        assert!(pending.is_empty());

        let published = broker.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, DATA_REQUEST_CHANNEL);
        assert!(published[0].1.starts_with("lobby-1;"));
        let frame = DataStreamFrame::decode(published[0].1.split_once(';').unwrap().1).unwrap();
        assert_eq!(frame.sender, "proxy");
        assert_eq!(frame.key, "player-count");
    }

    #[tokio::test]
    async fn should_time_out_without_answer() {
        let (use_case, _broker, pending) = setup(None, false);

        let response = use_case.execute(&Filter::All, "player-count", Value::Null).await.unwrap();

        assert!(response.timed_out());
        assert!(response.latency >= Duration::from_millis(50));
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn should_propagate_publish_failure_and_forget_request() {
        let (use_case, _broker, pending) = setup(None, true);

        let result = use_case.execute(&Filter::All, "player-count", Value::Null).await;

        assert!(matches!(result, Err(MessagingError::MessageFailure { .. })));
        assert!(pending.is_empty());
    }
}
