//! HTTP demo server.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing, timeout)
//!     → reply layer (middleware::ReplyEncoderLayer)
//!     → handlers.rs (return data, not responses)
//!     → encoded response
//! ```

pub mod handlers;
pub mod server;

pub use server::HttpServer;
