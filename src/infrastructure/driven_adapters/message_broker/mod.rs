//! Message Broker Implementations

mod in_memory;
mod redis_broker;

pub use in_memory::InMemoryBroker;
pub use redis_broker::{RedisBroker, SUBSCRIPTION_BUFFER};
