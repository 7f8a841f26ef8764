//! Post-handler dispatch.
//!
//! Turns the [`Reply`] a handler left on its placeholder response into the
//! final status, headers and body.

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use thiserror::Error;

use crate::encoder::{EncodeError, Encoder, EncoderOptions};
use crate::observability::metrics;
use crate::reply::{ErrorBody, Payload, Reply};

/// Failures that abort a request inside the reply layer.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The handler returned no body and never wrote a status.
    #[error("no status code set for a reply without a body")]
    MissingStatus,

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl DispatchError {
    fn reason(&self) -> &'static str {
        match self {
            Self::MissingStatus => "missing_status",
            Self::Encode(_) => "encode",
        }
    }
}

/// Empty 500 used whenever a reply cannot be produced.
pub fn failure_response(err: &DispatchError) -> Response {
    tracing::error!(error = %err, "Aborting reply");
    metrics::record_failure(err.reason());
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

/// Encode the reply carried by `response`, if any.
///
/// Responses without a reply (route misses, plain axum responses) are
/// returned untouched.
pub fn encode_response(response: Response, encoder: &dyn Encoder, options: EncoderOptions) -> Response {
    if response.extensions().get::<Reply>().is_none() {
        return response;
    }
    match dispatch(response, encoder, options) {
        Ok(response) => response,
        Err(err) => failure_response(&err),
    }
}

fn dispatch(response: Response, encoder: &dyn Encoder, options: EncoderOptions) -> Result<Response, DispatchError> {
    let (mut parts, _placeholder) = response.into_parts();
    let Some(reply) = parts.extensions.remove::<Reply>() else {
        return Ok(Response::from_parts(parts, Body::empty()));
    };
    let (explicit, body, mut context) = reply.into_parts();

    // A wrapper like `(StatusCode, Reply)` sets the placeholder status.
    let wrapped = (parts.status != StatusCode::OK).then_some(parts.status);
    if let Some(status) = wrapped.or(explicit) {
        context.write_header(status);
    }

    let body = match body {
        Some(body) => body,
        None => {
            let status = context.status().ok_or(DispatchError::MissingStatus)?;
            Payload::record(&ErrorBody::for_status(status))?
        }
    };

    parts.status = context.status().unwrap_or(StatusCode::OK);
    parts.headers.extend(context.into_headers());
    parts.headers.remove(header::CONTENT_LENGTH);

    let kind = body.kind();
    let bytes = match body {
        Payload::Bytes(bytes) => bytes,
        Payload::Scalar(text) => Bytes::from(text),
        Payload::Record(value) => encode_structured(&value, encoder, options, &mut parts.headers)?,
        Payload::RecordList(items) => {
            encode_structured(&Value::Array(items), encoder, options, &mut parts.headers)?
        }
    };

    tracing::debug!(
        status = %parts.status,
        kind,
        len = bytes.len(),
        "Encoded reply"
    );
    metrics::record_reply(kind);

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

fn encode_structured(
    value: &Value,
    encoder: &dyn Encoder,
    options: EncoderOptions,
    headers: &mut axum::http::HeaderMap,
) -> Result<Bytes, DispatchError> {
    let encoded = encoder.encode(value)?;
    if !headers.contains_key(header::CONTENT_TYPE) {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(encoder.content_type()),
        );
    }
    Ok(Bytes::from(options.apply(encoded)?))
}
