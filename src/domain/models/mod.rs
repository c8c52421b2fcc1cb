//! Domain Models
//!
//! Pure entities and value objects: credentials, wire envelopes, channels,
//! JSON messages and data request frames.

pub mod channel;
pub mod credentials;
pub mod data_request;
pub mod envelope;
pub mod parsable_message;

pub use channel::RedisChannel;
pub use credentials::RedisCredentials;
pub use data_request::{DataResponse, DataStreamFrame, StreamType, DATA_REQUEST_CHANNEL};
pub use envelope::{
    validate_filter_id, Envelope, Filter, ReceivedMessage, FILTER_ALL, FILTER_NONE, FILTER_SEPARATOR,
};
pub use parsable_message::ParsableMessage;
