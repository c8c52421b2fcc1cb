//! Messaging Use Cases
//!
//! Publishing to and dispatching from channels.

mod dispatch_message;
mod publish_message;

pub use dispatch_message::{DispatchMessageUseCase, DispatchOutcome};
pub use publish_message::PublishMessageUseCase;
