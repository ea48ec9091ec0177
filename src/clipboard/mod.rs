//! Clipboard core — session scope, buffer ownership, wide-text codec.
//!
//! The OS clipboard hands out and takes back reference-counted shared
//! memory; the types here make "who frees this block, and when" an
//! explicit, checkable property of every code path. Reads borrow the
//! clipboard's block and must not free it; writes own a fresh block
//! until the clipboard accepts it.

pub mod backend;
pub mod buffer;
pub mod session;
#[cfg(test)]
pub mod testing;
pub mod wide;
#[cfg(windows)]
pub mod windows;

pub use backend::ClipboardOs;
pub use session::Session;

/// Clipboard operation failures.
///
/// Every internal step reports a definite outcome; no step retries.
/// The CLI collapses all of these into one failure exit code, but the
/// kinds stay distinct for any richer boundary.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// Exclusive clipboard access was refused; another process may be
    /// holding it open.
    #[error("cannot acquire clipboard access")]
    AcquireFailed,
    /// A read or write was attempted on a session that is not open.
    #[error("clipboard session is not open")]
    SessionNotOpen,
    /// The clipboard holds no text format.
    #[error("no text available on the clipboard")]
    NoTextAvailable,
    /// A shared text block could not be mapped into the process.
    #[error("clipboard buffer lock failed")]
    LockFailed,
    /// A new shared block could not be reserved.
    #[error("clipboard buffer allocation failed")]
    AllocationFailed,
    /// Conversion between UTF-8 and wide text failed.
    #[error("clipboard text is not valid in the target encoding")]
    EncodingError,
    /// The clipboard refused to take the new content.
    #[error("publishing new clipboard content failed")]
    PublishFailed,
}

/// Read the clipboard's text as UTF-8 in one open/close scope.
pub fn read_utf8<O: ClipboardOs>(os: &O) -> Result<String, ClipboardError> {
    let mut session = Session::new(os);
    session.open()?;
    session.read_utf8()
    // Dropping the session closes the clipboard.
}

/// Publish UTF-8 text as the clipboard's content in one open/close
/// scope.
pub fn write_utf8<O: ClipboardOs>(os: &O, text: &str) -> Result<(), ClipboardError> {
    let mut session = Session::new(os);
    session.open()?;
    session.write_utf8(text)
}
