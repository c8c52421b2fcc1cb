//! Application Layer
//!
//! Contains the registries and use cases that orchestrate messaging.
//! Use cases depend on domain gateways (abstractions), not concrete implementations.

pub mod registries;
pub mod use_cases;
