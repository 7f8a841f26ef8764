//! Default JSON encoder.

use serde_json::Value;

use crate::encoder::{EncodeError, Encoder};

/// Content type set on structured bodies by [`JsonEncoder`].
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Encodes values with serde_json. Object keys keep insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonEncoder {
    /// Two-space pretty printing.
    pub pretty_print: bool,
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty_print: true }
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let bytes = if self.pretty_print {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        Ok(bytes)
    }

    fn content_type(&self) -> &'static str {
        JSON_CONTENT_TYPE
    }
}
