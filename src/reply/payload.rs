//! Response body shapes.

use std::fmt;

use axum::body::Bytes;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use crate::encoder::EncodeError;
use crate::reply::Reply;

/// The body a handler hands back.
///
/// Structured shapes go through the configured encoder; bytes and scalars are
/// written as they are.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Raw bytes, written verbatim.
    Bytes(Bytes),
    /// A single structured record.
    Record(Value),
    /// A homogeneous list of structured records.
    RecordList(Vec<Value>),
    /// Anything else, written as its string form.
    Scalar(String),
}

impl Payload {
    /// Capture a serializable value as a record.
    pub fn record<T: Serialize + ?Sized>(value: &T) -> Result<Self, EncodeError> {
        Ok(Self::Record(serde_json::to_value(value)?))
    }

    /// Capture a sequence of serializable values as a record list.
    pub fn records<'a, T, I>(items: I) -> Result<Self, EncodeError>
    where
        T: Serialize + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let values = items
            .into_iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::RecordList(values))
    }

    pub fn scalar(value: impl fmt::Display) -> Self {
        Self::Scalar(value.to_string())
    }

    pub fn bytes(bytes: impl Into<Bytes>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Whether this payload goes through the encoder.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Record(_) | Self::RecordList(_))
    }

    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "bytes",
            Self::Record(_) => "record",
            Self::RecordList(_) => "record_list",
            Self::Scalar(_) => "scalar",
        }
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes.into())
    }
}

impl From<&'static [u8]> for Payload {
    fn from(bytes: &'static [u8]) -> Self {
        Self::Bytes(Bytes::from_static(bytes))
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Scalar(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Scalar(text.to_owned())
    }
}

/// Objects become records and arrays record lists. Strings, numbers, bools
/// and null are scalars written as text.
impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Record(Value::Object(map)),
            Value::Array(items) => Self::RecordList(items),
            Value::String(text) => Self::Scalar(text),
            other => Self::Scalar(other.to_string()),
        }
    }
}

impl IntoResponse for Payload {
    fn into_response(self) -> Response {
        Reply::new(self).into_response()
    }
}
