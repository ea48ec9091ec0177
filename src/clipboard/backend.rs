//! Raw OS clipboard surface as a trait seam.
//!
//! The methods mirror the Win32 clipboard and global-memory calls
//! one-for-one so that the ownership protocol in [`buffer`] and
//! [`session`] can run unchanged against an in-memory fake in tests.
//!
//! [`buffer`]: super::buffer
//! [`session`]: super::session

use std::fmt::Debug;
use std::ptr::NonNull;

/// One OS clipboard implementation.
///
/// All methods take `&self`: the real backend is a stateless system
/// call shim, and ambient clipboard state lives in the OS, not in the
/// value.
pub trait ClipboardOs {
    /// Movable shared-memory handle (HGLOBAL on Windows). The backing
    /// address may change between locks; only a locked handle has a
    /// stable address.
    type Handle: Copy + Debug;

    /// Acquire exclusive clipboard access (OpenClipboard). Another
    /// process may hold it, so a single attempt either succeeds or
    /// fails; there is no retry at this layer.
    fn open(&self) -> bool;

    /// Release exclusive clipboard access (CloseClipboard).
    fn close(&self);

    /// Handle of the current wide-text content (GetClipboardData with
    /// CF_UNICODETEXT). `None` when the clipboard holds no text
    /// format. The clipboard keeps ownership of the returned handle;
    /// the caller must not free it.
    fn text_handle(&self) -> Option<Self::Handle>;

    /// Allocate a movable block of `bytes` bytes (GlobalAlloc with
    /// GMEM_MOVEABLE). The caller owns the returned handle.
    fn alloc(&self, bytes: usize) -> Option<Self::Handle>;

    /// Byte length of a block (GlobalSize); 0 for an invalid handle.
    fn size(&self, handle: Self::Handle) -> usize;

    /// Pin the block and return its address (GlobalLock). The address
    /// stays valid until the matching `unlock`.
    fn lock(&self, handle: Self::Handle) -> Option<NonNull<u8>>;

    /// Release a lock (GlobalUnlock).
    fn unlock(&self, handle: Self::Handle);

    /// Free a block this process owns (GlobalFree). Undefined for a
    /// locked block and for handles the clipboard owns.
    fn free(&self, handle: Self::Handle);

    /// Hand the block to the clipboard as its new wide-text content
    /// (EmptyClipboard + SetClipboardData). On success the clipboard
    /// owns the handle from that point on.
    fn publish(&self, handle: Self::Handle) -> bool;
}
