//! Registries
//!
//! Per-instance state shared between the API facade and the listener.

mod channel_registry;
mod node_identity;
mod pending_requests;
mod responder_registry;

pub use channel_registry::ChannelRegistry;
pub use node_identity::NodeIdentity;
pub use pending_requests::PendingRequests;
pub use responder_registry::{Responder, ResponderRegistry};
