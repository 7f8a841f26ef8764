//! Reply encoding middleware.
//!
//! # Data Flow
//! ```text
//! Request
//!     → layer.rs (pick encoder: request override or configured)
//!     → inner route handler returns a placeholder carrying a Reply
//!     → dispatch.rs (status, error body, classify, encode, write once)
//!     → Response
//! ```
//!
//! # Design Decisions
//! - Responses without a Reply pass through untouched
//! - Contract violations and encode failures become an empty 500

pub mod dispatch;
pub mod layer;

pub use dispatch::{encode_response, DispatchError};
pub use layer::{ReplyEncoderLayer, ReplyEncoderService};
