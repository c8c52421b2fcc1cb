//! Gateway Traits (Ports)
//!
//! Abstract interfaces defining contracts for external dependencies.
//! The broker is implemented by driven adapters in the infrastructure layer;
//! handlers are supplied by library users.

pub mod message_broker;
pub mod message_handler;

pub use message_broker::{IncomingMessage, MessageBroker};
pub use message_handler::MessageHandler;
