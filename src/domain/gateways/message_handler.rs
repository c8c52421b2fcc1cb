//! Message Handler Gateway
//!
//! Callback contract invoked for every message delivered on a channel.

use crate::domain::models::envelope::ReceivedMessage;

/// Receives messages delivered on a registered channel
///
/// Handlers run on the listener task and should return quickly; long work
/// belongs on a spawned task.
pub trait MessageHandler: Send + Sync {
    fn on_message(&self, message: &ReceivedMessage);
}

impl<F> MessageHandler for F
where
    F: Fn(&ReceivedMessage) + Send + Sync,
{
    fn on_message(&self, message: &ReceivedMessage) {
        self(message);
    }
}
