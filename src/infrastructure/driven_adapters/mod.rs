//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - Redis and in-memory message brokers
//! - Connection management
//! - Configuration

pub mod config;
pub mod connection;
pub mod message_broker;

pub use config::AppConfig;
pub use message_broker::{InMemoryBroker, RedisBroker};
