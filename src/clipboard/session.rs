//! Clipboard session — one open-clipboard scope and the two payload
//! operations.
//!
//! The session owns the process's exclusive right to the shared
//! clipboard between `open` and `close`. Reads borrow the clipboard's
//! own text block (never freeing it); writes own a fresh block until
//! the clipboard accepts it, then hand ownership over. Every failure
//! path still runs the scoped cleanup.

use std::ptr;
use std::slice;

use super::ClipboardError;
use super::backend::ClipboardOs;
use super::buffer::ScopedBuffer;
use super::wide;

/// One open-clipboard scope.
///
/// State machine: Closed → Open → Closed. `open` and `close` are both
/// idempotent, and `close` also runs on drop, so the clipboard is
/// released on every exit path once `open` succeeded.
pub struct Session<'os, O: ClipboardOs> {
    os: &'os O,
    open: bool,
}

impl<'os, O: ClipboardOs> Session<'os, O> {
    /// New session in the Closed state. Nothing is acquired yet.
    pub fn new(os: &'os O) -> Self {
        Self { os, open: false }
    }

    /// Acquire exclusive clipboard access.
    ///
    /// A no-op success when already open. On failure the session stays
    /// Closed; there is no partially-open state.
    pub fn open(&mut self) -> Result<(), ClipboardError> {
        if self.open {
            return Ok(());
        }
        if !self.os.open() {
            return Err(ClipboardError::AcquireFailed);
        }
        self.open = true;
        tracing::debug!("clipboard session opened");
        Ok(())
    }

    /// Release clipboard access. Idempotent; a no-op when Closed.
    pub fn close(&mut self) {
        if self.open {
            self.os.close();
            self.open = false;
            tracing::debug!("clipboard session closed");
        }
    }

    /// Whether the session currently holds the clipboard open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Read the clipboard's wide-text content as UTF-8.
    ///
    /// The clipboard keeps ownership of its text block, so the guard
    /// is disclaimed before locking: scope exit releases the lock but
    /// never frees the handle. The result is truncated at the first
    /// null terminator, which is dropped.
    pub fn read_utf8(&mut self) -> Result<String, ClipboardError> {
        if !self.open {
            return Err(ClipboardError::SessionNotOpen);
        }

        let handle = self
            .os
            .text_handle()
            .ok_or(ClipboardError::NoTextAvailable)?;
        let mut block = ScopedBuffer::new(self.os, handle);
        block.disclaim();

        let addr = block.lock().map_err(|_| ClipboardError::LockFailed)?;
        let unit_count = self.os.size(block.handle()) / 2;
        if unit_count == 0 {
            // Too small to hold even the terminator.
            return Err(ClipboardError::EncodingError);
        }

        // The lock is held for the lifetime of this slice; `block`
        // outlives every use of it. The scan never reads past the
        // block, terminated or not.
        let units =
            unsafe { slice::from_raw_parts(addr.as_ptr() as *const u16, unit_count) };
        let text = wide::decode(wide::terminated_units(units))
            .map_err(|_| ClipboardError::EncodingError)?;

        tracing::debug!(bytes = text.len(), wide_units = unit_count, "clipboard text read");
        Ok(text)
    }

    /// Publish UTF-8 text as the clipboard's new wide-text content.
    ///
    /// The guard owns the fresh block through conversion; if locking
    /// or publishing fails, scope exit frees it. Only after the
    /// clipboard accepts the handle is the guard disclaimed, moving
    /// release responsibility to the clipboard.
    pub fn write_utf8(&mut self, text: &str) -> Result<(), ClipboardError> {
        if !self.open {
            return Err(ClipboardError::SessionNotOpen);
        }

        // Wide unit count includes the terminator, 2 bytes per unit.
        let units = wide::encode_nul_terminated(text);
        let handle = self
            .os
            .alloc(units.len() * 2)
            .ok_or(ClipboardError::AllocationFailed)?;
        let mut block = ScopedBuffer::new(self.os, handle);

        let addr = block.lock().map_err(|_| ClipboardError::LockFailed)?;
        unsafe {
            ptr::copy_nonoverlapping(units.as_ptr(), addr.as_ptr() as *mut u16, units.len());
        }
        block.unlock();

        // The handle must be unlocked before the clipboard takes it.
        if !self.os.publish(block.handle()) {
            return Err(ClipboardError::PublishFailed);
        }
        block.disclaim();

        tracing::debug!(bytes = text.len(), wide_units = units.len(), "clipboard text written");
        Ok(())
    }
}

impl<O: ClipboardOs> Drop for Session<'_, O> {
    fn drop(&mut self) {
        self.close();
    }
}
