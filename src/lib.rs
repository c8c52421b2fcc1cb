//! Redis Messaging
//!
//! Channel-based pub/sub messaging over Redis with filter-ID routing and a
//! request/response data stream, following Clean/Hexagonal Architecture
//! principles.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use domain::models::{
    DataResponse, Filter, ParsableMessage, ReceivedMessage, RedisChannel, RedisCredentials,
};
pub use infrastructure::driven_adapters::{AppConfig, InMemoryBroker, RedisBroker};
pub use infrastructure::driving_adapters::{MessagingSettings, RedisApi};
pub use shared::errors::{BrokerError, MessagingError};
