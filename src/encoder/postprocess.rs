//! Text-level transforms over encoded JSON.
//!
//! `indent` re-serializes the body and would undo escapes, so it runs before
//! `html_escape`.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use crate::encoder::EncodeError;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Replace `<`, `>`, `&`, U+2028 and U+2029 with their `\uXXXX` escapes.
pub fn html_escape(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len() + src.len() / 8);
    let mut i = 0;
    while i < src.len() {
        let c = src[i];
        match c {
            b'<' | b'>' | b'&' => {
                out.extend_from_slice(b"\\u00");
                out.push(HEX[usize::from(c >> 4)]);
                out.push(HEX[usize::from(c & 0xF)]);
            }
            // U+2028 / U+2029 are E2 80 A8 / E2 80 A9 in UTF-8.
            0xE2 if src.get(i + 1) == Some(&0x80) && matches!(src.get(i + 2), Some(0xA8 | 0xA9)) => {
                out.extend_from_slice(b"\\u202");
                out.push(HEX[usize::from(src[i + 2] & 0xF)]);
                i += 3;
                continue;
            }
            _ => out.push(c),
        }
        i += 1;
    }
    out
}

/// Re-indent JSON text with one tab per nesting level.
///
/// The input is parsed first, so a body that is not JSON is an error rather
/// than silently reshaped. Empty containers stay compact.
pub fn indent(src: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let value: Value = serde_json::from_slice(src).map_err(EncodeError::NotJson)?;
    let mut out = Vec::with_capacity(src.len() * 2);
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut serializer)?;
    Ok(out)
}
