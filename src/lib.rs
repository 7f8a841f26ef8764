//! Reply encoding for axum handlers.
//!
//! Handlers return data (records, record lists, bytes, scalars, or a status
//! code with or without a body) and [`ReplyEncoderLayer`] writes it onto the
//! response, choosing status and content type from the shape of the reply.

pub mod config;
pub mod encoder;
pub mod http;
pub mod middleware;
pub mod observability;
pub mod reply;
pub mod store;

pub use config::ServerConfig;
pub use encoder::{EncodeError, Encoder, EncoderOptions, JsonEncoder, SharedEncoder};
pub use http::HttpServer;
pub use middleware::{DispatchError, ReplyEncoderLayer};
pub use reply::{ErrorBody, Payload, Record, Records, Reply, ReplyContext};
