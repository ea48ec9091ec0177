//! Scoped guard over one movable shared-memory block.
//!
//! Tracks two pieces of state the raw handle cannot: whether this
//! scope currently holds the block's lock, and whether this scope is
//! still responsible for freeing the block. Drop releases the lock
//! first and frees second; freeing a locked block is undefined per the
//! OS contract, so that order is mandatory.

use std::ptr::NonNull;

use super::backend::ClipboardOs;

/// Lock acquisition failures.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum LockError {
    /// This guard already holds its one allowed lock.
    #[error("buffer is already locked")]
    AlreadyLocked,
    /// The OS refused the lock (handle invalid or discarded).
    #[error("buffer lock was refused")]
    Refused,
}

/// Guard over one movable block.
///
/// Starts unlocked and owning: unless [`disclaim`] runs first, scope
/// exit frees the block. A borrowed handle (clipboard-owned content)
/// must be disclaimed immediately after wrapping; a fresh allocation
/// is disclaimed only once its ownership has moved elsewhere.
///
/// [`disclaim`]: ScopedBuffer::disclaim
pub struct ScopedBuffer<'os, O: ClipboardOs> {
    os: &'os O,
    handle: O::Handle,
    locked: bool,
    owns: bool,
}

impl<'os, O: ClipboardOs> ScopedBuffer<'os, O> {
    /// Take charge of a handle the caller currently holds.
    pub fn new(os: &'os O, handle: O::Handle) -> Self {
        Self {
            os,
            handle,
            locked: false,
            owns: true,
        }
    }

    /// The wrapped handle.
    pub fn handle(&self) -> O::Handle {
        self.handle
    }

    /// Pin the block and return its address, valid until [`unlock`].
    ///
    /// At most one lock may be outstanding per guard; a second attempt
    /// fails with [`LockError::AlreadyLocked`] instead of nesting.
    ///
    /// [`unlock`]: ScopedBuffer::unlock
    pub fn lock(&mut self) -> Result<NonNull<u8>, LockError> {
        if self.locked {
            return Err(LockError::AlreadyLocked);
        }
        let addr = self.os.lock(self.handle).ok_or(LockError::Refused)?;
        self.locked = true;
        Ok(addr)
    }

    /// Release the lock if held. Idempotent; a no-op when unlocked.
    pub fn unlock(&mut self) {
        if self.locked {
            self.os.unlock(self.handle);
            self.locked = false;
        }
    }

    /// Give up release responsibility.
    ///
    /// Used when the handle was only borrowed from the clipboard, or
    /// when its ownership has just been transferred to the clipboard
    /// as published content. After this the guard never frees.
    pub fn disclaim(&mut self) {
        self.owns = false;
    }
}

impl<O: ClipboardOs> Drop for ScopedBuffer<'_, O> {
    fn drop(&mut self) {
        self.unlock();
        if self.owns {
            self.os.free(self.handle);
        }
    }
}
