//! Data Request Use Cases
//!
//! Request/response exchanges over the reserved data request channel.

mod handle_data_stream;
mod send_data_request;

pub use handle_data_stream::{DataStreamListener, DataStreamOutcome, HandleDataStreamUseCase};
pub use send_data_request::SendDataRequestUseCase;
