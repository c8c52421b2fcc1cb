//! Use Cases
//!
//! Application-specific messaging rules.
//! Each use case is a single-purpose struct with an execute() method.

pub mod data_requests;
pub mod messaging;

pub use data_requests::{
    DataStreamListener, DataStreamOutcome, HandleDataStreamUseCase, SendDataRequestUseCase,
};
pub use messaging::{DispatchMessageUseCase, DispatchOutcome, PublishMessageUseCase};
