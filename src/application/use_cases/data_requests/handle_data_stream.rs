//! Handle Data Stream Use Case
//!
//! Answers incoming data requests with the registered responder and hands
//! incoming responses to the waiting requester.

use std::sync::Arc;

use crate::application::registries::{NodeIdentity, PendingRequests, ResponderRegistry};
use crate::application::use_cases::messaging::PublishMessageUseCase;
use crate::domain::gateways::MessageHandler;
use crate::domain::models::data_request::{DataStreamFrame, StreamType, DATA_REQUEST_CHANNEL};
use crate::domain::models::envelope::{Filter, ReceivedMessage};
use crate::shared::errors::MessagingError;

/// What happened to a data stream frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataStreamOutcome {
    /// A request was answered
    Responded,
    /// A request arrived for a key with no responder here
    NoResponder,
    /// A response reached its waiting requester
    Completed,
    /// A response arrived that nobody here is waiting for
    Unclaimed,
}

/// Use case for handling data request frames
pub struct HandleDataStreamUseCase {
    responders: Arc<ResponderRegistry>,
    pending: Arc<PendingRequests>,
    identity: Arc<NodeIdentity>,
    publisher: Arc<PublishMessageUseCase>,
}

impl HandleDataStreamUseCase {
    /// Create a new HandleDataStreamUseCase
    #[must_use]
    pub fn new(
        responders: Arc<ResponderRegistry>,
        pending: Arc<PendingRequests>,
        identity: Arc<NodeIdentity>,
        publisher: Arc<PublishMessageUseCase>,
    ) -> Self {
        Self {
            responders,
            pending,
            identity,
            publisher,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `MessagingError::Payload` if the frame cannot be decoded, or
    /// `MessagingError::MessageFailure` if the response cannot be published.
    pub async fn execute(&self, payload: &str) -> Result<DataStreamOutcome, MessagingError> {
        let frame = DataStreamFrame::decode(payload)?;

        match frame.stream {
            StreamType::Request => {
                let Some(responder) = self.responders.get(&frame.key) else {
                    tracing::trace!(request_id = %frame.id, key = %frame.key, "No responder for data request");
                    return Ok(DataStreamOutcome::NoResponder);
                };

                let data = responder(frame.data.clone());
                let response = frame.respond(data, self.identity.reply_filter());
                let target = Filter::from(frame.sender.as_str());

                self.publisher
                    .execute(DATA_REQUEST_CHANNEL, &target, &response.encode()?)
                    .await?;

                tracing::debug!(request_id = %frame.id, key = %frame.key, target = %target, "Answered data request");
                Ok(DataStreamOutcome::Responded)
            }
            StreamType::Response => {
                if self.pending.complete(&frame.id, frame.data) {
                    tracing::trace!(request_id = %frame.id, "Data response received");
                    Ok(DataStreamOutcome::Completed)
                } else {
                    tracing::trace!(request_id = %frame.id, "Ignoring unclaimed data response");
                    Ok(DataStreamOutcome::Unclaimed)
                }
            }
        }
    }
}

/// Channel handler for the reserved data request channel
///
/// Frames are processed on a spawned task so that answering a request never
/// blocks the listener.
pub struct DataStreamListener {
    use_case: Arc<HandleDataStreamUseCase>,
}

impl DataStreamListener {
    #[must_use]
    pub fn new(use_case: Arc<HandleDataStreamUseCase>) -> Self {
        Self { use_case }
    }
}

impl MessageHandler for DataStreamListener {
    fn on_message(&self, message: &ReceivedMessage) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(channel = %message.channel, "Data stream frame received outside a tokio runtime");
            return;
        };

        let use_case = self.use_case.clone();
        let payload = message.payload.clone();
        runtime.spawn(async move {
            if let Err(error) = use_case.execute(&payload).await {
                tracing::warn!(error = %error, code = error.error_code(), "Dropping data stream frame");
            }
        });
    }
}
