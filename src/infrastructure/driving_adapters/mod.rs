//! Driving Adapters
//!
//! Entry points that drive the application:
//! - The `RedisApi` facade used by library callers
//! - The listener task fed by broker subscriptions

pub mod listener;
pub mod redis_api;

pub use redis_api::{MessagingSettings, RedisApi};
