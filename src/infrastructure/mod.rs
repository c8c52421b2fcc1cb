//! Infrastructure Layer
//!
//! Contains all external concerns: driving adapters (the API facade and
//! listener) and driven adapters (brokers, connections, configuration).

pub mod driven_adapters;
pub mod driving_adapters;
