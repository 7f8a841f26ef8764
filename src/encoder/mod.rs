//! Encoding subsystem.
//!
//! # Data Flow
//! ```text
//! Payload::Record / Payload::RecordList
//!     → Encoder::encode (json.rs by default, pluggable)
//!     → postprocess.rs (indent, HTML-escape; per EncoderOptions)
//!     → response body bytes
//! ```
//!
//! # Design Decisions
//! - Encoders see a `serde_json::Value`, never the handler's concrete type
//! - An encoder may be swapped per request through [`SharedEncoder`]
//! - Post-processing operates on JSON text, not on the value

pub mod json;
pub mod postprocess;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use json::{JsonEncoder, JSON_CONTENT_TYPE};

/// Errors produced while turning a structured value into bytes.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Indentation was requested for a body that does not parse as JSON.
    #[error("encoded body is not JSON: {0}")]
    NotJson(#[source] serde_json::Error),

    #[error("{encoder} encoder failed: {message}")]
    Custom {
        encoder: &'static str,
        message: String,
    },
}

impl EncodeError {
    /// Build an error for an encoder that is not backed by serde_json.
    pub fn custom(encoder: &'static str, message: impl Into<String>) -> Self {
        Self::Custom {
            encoder,
            message: message.into(),
        }
    }
}

/// Converts a structured value into a response body.
pub trait Encoder: Send + Sync + fmt::Debug {
    /// Encode the value into bytes.
    fn encode(&self, value: &Value) -> Result<Vec<u8>, EncodeError>;

    /// Content type announced for bodies produced by this encoder.
    fn content_type(&self) -> &'static str;
}

/// Cloneable handle to an encoder.
///
/// Inserting one into the request extensions ahead of the reply layer
/// overrides the layer's configured encoder for that request only.
#[derive(Clone)]
pub struct SharedEncoder(Arc<dyn Encoder>);

impl SharedEncoder {
    pub fn new(encoder: impl Encoder + 'static) -> Self {
        Self(Arc::new(encoder))
    }

    pub fn encoder(&self) -> &dyn Encoder {
        self.0.as_ref()
    }
}

impl fmt::Debug for SharedEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedEncoder").field(&self.0).finish()
    }
}

/// Pretty-printed JSON.
impl Default for SharedEncoder {
    fn default() -> Self {
        Self::new(JsonEncoder::pretty())
    }
}

/// Post-processing applied to structured bodies after encoding.
///
/// No options and default options are the same thing: both flags off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EncoderOptions {
    /// Escape `<`, `>`, `&`, U+2028 and U+2029 for safe embedding in HTML.
    pub html_escape: bool,

    /// Re-indent the encoded body, one tab per nesting level.
    pub indent: bool,
}

impl EncoderOptions {
    /// Run the configured post-processing steps over an encoded body.
    ///
    /// Fails only when indentation is on and the body is not JSON.
    pub fn apply(&self, encoded: Vec<u8>) -> Result<Vec<u8>, EncodeError> {
        let mut body = encoded;
        if self.indent {
            body = postprocess::indent(&body)?;
        }
        if self.html_escape {
            body = postprocess::html_escape(&body);
        }
        Ok(body)
    }
}
