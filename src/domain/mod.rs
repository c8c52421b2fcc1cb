//! Domain Layer
//!
//! Contains the messaging models and gateway traits (ports).
//! This layer has no dependencies on infrastructure.

pub mod gateways;
pub mod models;

pub use gateways::{IncomingMessage, MessageBroker, MessageHandler};
pub use models::{
    DataResponse, DataStreamFrame, Envelope, Filter, ParsableMessage, ReceivedMessage,
    RedisChannel, RedisCredentials, StreamType,
};
