//! Handler return values.
//!
//! # Data Flow
//! ```text
//! handler
//!     → context.rs (optional: status written, headers set)
//!     → Reply { explicit status?, body?, context }
//!     → IntoResponse: placeholder response carrying the Reply
//!     → middleware layer encodes it onto the real response
//! ```
//!
//! # Return Forms
//! - status + body: `Reply::with_status`, `(StatusCode, Record<T>)`
//! - body only: `Reply::new`, `Record<T>`, `Records<T>`, `Payload`
//! - status only: `Reply::from_status`, encoded as an [`ErrorBody`]
//! - nothing: `ReplyContext::finish`, relies on a status written earlier

pub mod context;
pub mod payload;

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::middleware::dispatch::{failure_response, DispatchError};

pub use context::ReplyContext;
pub use payload::Payload;

/// What a handler hands back to the reply layer.
#[derive(Debug, Clone, Default)]
pub struct Reply {
    status: Option<StatusCode>,
    body: Option<Payload>,
    context: ReplyContext,
}

impl Reply {
    /// Body only.
    pub fn new(body: impl Into<Payload>) -> Self {
        Self::from_parts(None, Some(body.into()), ReplyContext::new())
    }

    /// Explicit status and body.
    pub fn with_status(status: StatusCode, body: impl Into<Payload>) -> Self {
        Self::from_parts(Some(status), Some(body.into()), ReplyContext::new())
    }

    /// Explicit status and no body; the layer fills in an [`ErrorBody`].
    pub fn from_status(status: StatusCode) -> Self {
        Self::from_parts(Some(status), None, ReplyContext::new())
    }

    /// No status and no body. Only valid once a status has been captured.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        status: Option<StatusCode>,
        body: Option<Payload>,
        context: ReplyContext,
    ) -> Self {
        Self {
            status,
            body,
            context,
        }
    }

    pub(crate) fn into_parts(self) -> (Option<StatusCode>, Option<Payload>, ReplyContext) {
        (self.status, self.body, self.context)
    }

    pub fn explicit_status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn body(&self) -> Option<&Payload> {
        self.body.as_ref()
    }

    pub fn context(&self) -> &ReplyContext {
        &self.context
    }
}

impl From<Payload> for Reply {
    fn from(body: Payload) -> Self {
        Self::new(body)
    }
}

impl From<(StatusCode, Payload)> for Reply {
    fn from((status, body): (StatusCode, Payload)) -> Self {
        Self::with_status(status, body)
    }
}

/// Hands the reply to the layer through the response extensions.
///
/// The placeholder has an empty body. A status set on it by an outer wrapper
/// such as `(StatusCode, Reply)` is honored by the layer when it is not 200.
impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::empty());
        response.extensions_mut().insert(self);
        response
    }
}

/// A typed record returned straight from a handler.
///
/// Handlers returning `Record<T>` can be called from other handlers and the
/// inner value taken back out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Record<T>(pub T);

impl<T: Serialize> IntoResponse for Record<T> {
    fn into_response(self) -> Response {
        match Payload::record(&self.0) {
            Ok(payload) => Reply::new(payload).into_response(),
            Err(err) => failure_response(&DispatchError::Encode(err)),
        }
    }
}

/// A typed list of records returned straight from a handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Records<T>(pub Vec<T>);

impl<T: Serialize> IntoResponse for Records<T> {
    fn into_response(self) -> Response {
        match Payload::records(&self.0) {
            Ok(payload) => Reply::new(payload).into_response(),
            Err(err) => failure_response(&DispatchError::Encode(err)),
        }
    }
}

/// Body synthesized for replies that carry a status but no body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename = "error")]
pub struct ErrorBody {
    pub error: u16,
    pub message: String,
}

impl ErrorBody {
    /// Uses the canonical reason phrase; unknown codes get an empty message.
    pub fn for_status(status: StatusCode) -> Self {
        Self {
            error: status.as_u16(),
            message: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}
