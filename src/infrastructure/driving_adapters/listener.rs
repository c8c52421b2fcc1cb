//! Subscriber Listener
//!
//! Drains the broker subscription and feeds each message to dispatch.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::application::use_cases::messaging::DispatchMessageUseCase;
use crate::domain::gateways::IncomingMessage;

/// Spawn the listener task for a subscription
///
/// The task ends when the subscription closes. A panicking handler is logged
/// and does not stop the listener.
pub fn spawn_listener(
    mut receiver: mpsc::Receiver<IncomingMessage>,
    dispatcher: Arc<DispatchMessageUseCase>,
) -> JoinHandle<()> {
    let span = tracing::info_span!("redis_listener");

    tokio::spawn(
        async move {
            tracing::debug!("Listener started");
            while let Some(incoming) = receiver.recv().await {
                if catch_unwind(AssertUnwindSafe(|| dispatcher.execute(&incoming))).is_err() {
                    tracing::error!(channel = %incoming.channel, "Channel handler panicked");
                }
            }
            tracing::debug!("Listener stopped");
        }
        .instrument(span),
    )
}
