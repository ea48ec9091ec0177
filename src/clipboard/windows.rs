//! Real clipboard backend over the Win32 API.
//!
//! Stateless shim: every method is one system call, and all clipboard
//! state lives in the OS. Ownership rules come from the Win32
//! contract: GetClipboardData handles belong to the clipboard and must
//! not be freed or left locked, and a handle given to SetClipboardData
//! belongs to the clipboard from then on.

use std::ptr::{self, NonNull};

use winapi::shared::ntdef::HANDLE;
use winapi::um::winbase::{
    GMEM_MOVEABLE, GlobalAlloc, GlobalFree, GlobalLock, GlobalSize, GlobalUnlock,
};
use winapi::um::winuser::{
    CF_UNICODETEXT, CloseClipboard, EmptyClipboard, GetClipboardData, OpenClipboard,
    SetClipboardData,
};

use super::backend::ClipboardOs;

/// Win32 clipboard and global-memory surface.
pub struct WinOs;

impl ClipboardOs for WinOs {
    type Handle = HANDLE;

    fn open(&self) -> bool {
        // Null owner window binds the open clipboard to this task.
        unsafe { OpenClipboard(ptr::null_mut()) != 0 }
    }

    fn close(&self) {
        unsafe {
            CloseClipboard();
        }
    }

    fn text_handle(&self) -> Option<HANDLE> {
        let handle = unsafe { GetClipboardData(CF_UNICODETEXT) };
        if handle.is_null() { None } else { Some(handle) }
    }

    fn alloc(&self, bytes: usize) -> Option<HANDLE> {
        let handle = unsafe { GlobalAlloc(GMEM_MOVEABLE, bytes) };
        if handle.is_null() { None } else { Some(handle) }
    }

    fn size(&self, handle: HANDLE) -> usize {
        unsafe { GlobalSize(handle) }
    }

    fn lock(&self, handle: HANDLE) -> Option<NonNull<u8>> {
        NonNull::new(unsafe { GlobalLock(handle) } as *mut u8)
    }

    fn unlock(&self, handle: HANDLE) {
        unsafe {
            GlobalUnlock(handle);
        }
    }

    fn free(&self, handle: HANDLE) {
        unsafe {
            GlobalFree(handle);
        }
    }

    fn publish(&self, handle: HANDLE) -> bool {
        unsafe {
            if EmptyClipboard() == 0 {
                return false;
            }
            !SetClipboardData(CF_UNICODETEXT, handle).is_null()
        }
    }
}
