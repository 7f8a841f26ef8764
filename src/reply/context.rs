//! Per-request reply context.
//!
//! # Responsibilities
//! - Record the status code a handler writes before returning
//! - Carry headers the handler wants on the final response
//! - Finish into a [`Reply`] so the context travels back with the body
//!
//! # Design Decisions
//! - Owned by the handler for the lifetime of one request, never shared
//! - The last written status wins

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};

use crate::reply::{Payload, Reply};

/// Status and headers written by a handler.
#[derive(Debug, Clone, Default)]
pub struct ReplyContext {
    status: Option<StatusCode>,
    headers: HeaderMap,
}

impl ReplyContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a status code for the response.
    pub fn write_header(&mut self, status: StatusCode) {
        if let Some(previous) = self.status {
            tracing::trace!(previous = %previous, status = %status, "Overwriting captured status");
        }
        self.status = Some(status);
    }

    /// The last status written, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Finish without a body. The captured status selects the error body.
    pub fn finish(self) -> Reply {
        Reply::from_parts(None, None, self)
    }

    /// Finish with a body.
    pub fn respond(self, body: impl Into<Payload>) -> Reply {
        Reply::from_parts(None, Some(body.into()), self)
    }

    /// Finish with an explicit status and a body.
    pub fn respond_with(self, status: StatusCode, body: impl Into<Payload>) -> Reply {
        Reply::from_parts(Some(status), Some(body.into()), self)
    }

    pub(crate) fn into_headers(self) -> HeaderMap {
        self.headers
    }
}

impl<S> FromRequestParts<S> for ReplyContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::new())
    }
}
