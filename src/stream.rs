//! Byte-stream boundary between the clipboard core and the process's
//! standard streams.
//!
//! Input is bounded: reading more than the accepted maximum is a hard
//! failure, never a silent truncation. Binary mode passes bytes
//! through untouched; text mode performs the classic console-stream
//! translation: `\r\n` to `\n` on input, `\n` to `\r\n` on output, and
//! input stops at a Ctrl-Z end-of-input marker.

use std::io::{self, Read, Write};

/// Default input bound for `copy`, in bytes.
pub const MAX_INPUT_BYTES: usize = 32 * 1024;

/// End-of-input marker honored by text-mode console streams.
const CTRL_Z: u8 = 0x1A;

/// Stream translation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Raw bytes, no translation.
    Binary,
    /// Console text-stream line-ending translation.
    Text,
}

/// Boundary I/O failures.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Input exceeded the accepted bound.
    #[error("input exceeds the {limit}-byte maximum")]
    InputTooLarge { limit: usize },
    /// Input ended with a read failure other than end-of-input.
    #[error("input read failed: {0}")]
    Io(#[from] io::Error),
    /// Input bytes are not valid UTF-8.
    #[error("input is not valid UTF-8")]
    InvalidUtf8,
}

/// Read at most `max` bytes from `reader` as UTF-8 text.
///
/// Exactly `max` bytes succeed; one byte more is
/// [`StreamError::InputTooLarge`].
pub fn read_input(reader: &mut impl Read, mode: Mode, max: usize) -> Result<String, StreamError> {
    let mut bytes = Vec::new();
    // One extra byte distinguishes "exactly at the bound" from
    // "over". Saturating: a take of u64::MAX cannot be exceeded, so
    // an unbounded `max` reads everything and never trips the check.
    reader
        .take((max as u64).saturating_add(1))
        .read_to_end(&mut bytes)?;
    if mode == Mode::Text {
        // Console text streams treat Ctrl-Z as end-of-input.
        if let Some(end) = bytes.iter().position(|&b| b == CTRL_Z) {
            bytes.truncate(end);
        }
    }
    if bytes.len() > max {
        return Err(StreamError::InputTooLarge { limit: max });
    }
    if mode == Mode::Text {
        bytes = fold_crlf(&bytes);
    }
    String::from_utf8(bytes).map_err(|_| StreamError::InvalidUtf8)
}

/// Write the payload followed by a trailing newline, then flush.
pub fn write_output(writer: &mut impl Write, text: &str, mode: Mode) -> io::Result<()> {
    match mode {
        Mode::Binary => {
            writer.write_all(text.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        Mode::Text => {
            writer.write_all(&expand_newlines(text.as_bytes()))?;
            writer.write_all(b"\r\n")?;
        }
    }
    writer.flush()
}

/// Fold `\r\n` pairs into `\n`; a lone `\r` passes through.
fn fold_crlf(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
            // Skip the \r; the \n lands on the next iteration.
        } else {
            out.push(bytes[i]);
        }
        i += 1;
    }
    out
}

/// Expand every `\n` to `\r\n`.
fn expand_newlines(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + 16);
    for &b in bytes {
        if b == b'\n' {
            out.push(b'\r');
        }
        out.push(b);
    }
    out
}
