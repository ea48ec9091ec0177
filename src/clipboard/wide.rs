//! UTF-8 ⇄ null-terminated wide-text conversion.
//!
//! Clipboard text blocks are null-terminated UTF-16 sequences. Encoding
//! appends the terminator; decoding stops at the first terminator and
//! drops it from the result. Malformed input on either side is an
//! error, never a silent substitution.

use std::char::{self, DecodeUtf16Error};

/// Encode UTF-8 text as UTF-16 units with a trailing null terminator.
///
/// Infallible for `&str`. The result always holds at least the
/// terminator, so an empty string encodes to one unit.
pub fn encode_nul_terminated(text: &str) -> Vec<u16> {
    let mut units: Vec<u16> = text.encode_utf16().collect();
    units.push(0);
    units
}

/// Slice the units preceding the first null terminator.
///
/// An unterminated block yields the whole slice.
pub fn terminated_units(units: &[u16]) -> &[u16] {
    match units.iter().position(|&u| u == 0) {
        Some(end) => &units[..end],
        None => units,
    }
}

/// Decode UTF-16 units (terminator already stripped) into UTF-8 text.
///
/// An unpaired surrogate fails the whole conversion.
pub fn decode(units: &[u16]) -> Result<String, DecodeUtf16Error> {
    char::decode_utf16(units.iter().copied()).collect()
}
