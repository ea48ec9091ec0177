//! In-memory clipboard backend for tests.
//!
//! Models the OS side of the protocol: a handle table of wide-text
//! blocks with per-block lock flags, a single content slot, and
//! fault-injection switches. Ownership mistakes (double free, free of
//! a locked or clipboard-owned block) are recorded in a violation log
//! that tests assert empty, instead of aborting mid-drop.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ptr::NonNull;

use super::backend::ClipboardOs;
use super::wide;

#[derive(Debug)]
struct Block {
    data: Box<[u16]>,
    locked: bool,
}

#[derive(Debug, Default)]
struct State {
    open: bool,
    blocks: HashMap<usize, Block>,
    content: Option<usize>,
    next_handle: usize,
    deny_open: bool,
    deny_lock: bool,
    deny_alloc: bool,
    deny_publish: bool,
    open_calls: u32,
    close_calls: u32,
    freed: Vec<usize>,
    violations: Vec<String>,
}

impl State {
    fn insert_block(&mut self, units: Vec<u16>) -> usize {
        self.next_handle += 1;
        let handle = self.next_handle;
        self.blocks.insert(
            handle,
            Block {
                data: units.into_boxed_slice(),
                locked: false,
            },
        );
        handle
    }
}

/// Fake clipboard OS with interior mutability, so trait methods take
/// `&self` like a real system-call shim.
pub struct FakeOs {
    state: RefCell<State>,
}

impl FakeOs {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(State::default()),
        }
    }

    /// Preload wide-text content, terminator appended.
    pub fn set_content_text(&self, text: &str) {
        self.set_content_units(&wide::encode_nul_terminated(text));
    }

    /// Preload raw wide units as content, exactly as given (no
    /// terminator is added).
    pub fn set_content_units(&self, units: &[u16]) {
        let mut s = self.state.borrow_mut();
        let handle = s.insert_block(units.to_vec());
        s.content = Some(handle);
    }

    pub fn deny_open(&self) {
        self.state.borrow_mut().deny_open = true;
    }

    pub fn deny_lock(&self) {
        self.state.borrow_mut().deny_lock = true;
    }

    pub fn deny_alloc(&self) {
        self.state.borrow_mut().deny_alloc = true;
    }

    pub fn deny_publish(&self) {
        self.state.borrow_mut().deny_publish = true;
    }

    /// Current content decoded up to its terminator, if any.
    pub fn content_text(&self) -> Option<String> {
        let s = self.state.borrow();
        let block = s.blocks.get(&s.content?)?;
        wide::decode(wide::terminated_units(&block.data)).ok()
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    pub fn open_calls(&self) -> u32 {
        self.state.borrow().open_calls
    }

    pub fn close_calls(&self) -> u32 {
        self.state.borrow().close_calls
    }

    pub fn block_exists(&self, handle: usize) -> bool {
        self.state.borrow().blocks.contains_key(&handle)
    }

    /// Handles freed by the process under test, in order.
    pub fn freed(&self) -> Vec<usize> {
        self.state.borrow().freed.clone()
    }

    /// Ownership violations recorded so far.
    pub fn violations(&self) -> Vec<String> {
        self.state.borrow().violations.clone()
    }
}

impl ClipboardOs for FakeOs {
    type Handle = usize;

    fn open(&self) -> bool {
        let mut s = self.state.borrow_mut();
        s.open_calls += 1;
        if s.deny_open {
            return false;
        }
        s.open = true;
        true
    }

    fn close(&self) {
        let mut s = self.state.borrow_mut();
        s.close_calls += 1;
        s.open = false;
    }

    fn text_handle(&self) -> Option<usize> {
        self.state.borrow().content
    }

    fn alloc(&self, bytes: usize) -> Option<usize> {
        let mut s = self.state.borrow_mut();
        if s.deny_alloc {
            return None;
        }
        Some(s.insert_block(vec![0u16; bytes.div_ceil(2)]))
    }

    fn size(&self, handle: usize) -> usize {
        self.state
            .borrow()
            .blocks
            .get(&handle)
            .map_or(0, |b| b.data.len() * 2)
    }

    fn lock(&self, handle: usize) -> Option<NonNull<u8>> {
        let mut s = self.state.borrow_mut();
        if s.deny_lock {
            return None;
        }
        let block = s.blocks.get_mut(&handle)?;
        block.locked = true;
        // A Box's heap storage does not move when the map rehashes, so
        // this address stays stable while the block exists.
        NonNull::new(block.data.as_ptr() as *mut u8)
    }

    fn unlock(&self, handle: usize) {
        if let Some(block) = self.state.borrow_mut().blocks.get_mut(&handle) {
            block.locked = false;
        }
    }

    fn free(&self, handle: usize) {
        let mut s = self.state.borrow_mut();
        let locked = s.blocks.get(&handle).map(|b| b.locked);
        match locked {
            None => {
                let msg = if s.freed.contains(&handle) {
                    format!("double free of block {handle}")
                } else {
                    format!("free of unknown handle {handle}")
                };
                s.violations.push(msg);
                return;
            }
            Some(true) => {
                s.violations.push(format!("free of locked block {handle}"));
            }
            Some(false) => {
                if s.content == Some(handle) {
                    s.violations
                        .push(format!("free of clipboard-owned block {handle}"));
                }
            }
        }
        s.blocks.remove(&handle);
        s.freed.push(handle);
    }

    fn publish(&self, handle: usize) -> bool {
        let mut s = self.state.borrow_mut();
        if s.deny_publish {
            return false;
        }
        if !s.blocks.contains_key(&handle) {
            s.violations
                .push(format!("publish of unknown handle {handle}"));
            return false;
        }
        // The clipboard itself releases whatever it owned before; that
        // is a system free, not one charged to the process under test.
        if let Some(old) = s.content.take() {
            if old != handle {
                s.blocks.remove(&old);
            }
        }
        s.content = Some(handle);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Violation log --

    #[test]
    fn double_free_is_recorded() {
        let os = FakeOs::new();
        let handle = os.alloc(2).unwrap();
        os.free(handle);
        os.free(handle);
        assert_eq!(os.violations().len(), 1);
        assert!(os.violations()[0].contains("double free"));
    }

    #[test]
    fn free_of_locked_block_is_recorded() {
        let os = FakeOs::new();
        let handle = os.alloc(2).unwrap();
        os.lock(handle).unwrap();
        os.free(handle);
        assert!(os.violations()[0].contains("locked"));
    }

    #[test]
    fn free_of_clipboard_owned_block_is_recorded() {
        let os = FakeOs::new();
        os.set_content_text("theirs");
        let handle = os.text_handle().unwrap();
        os.free(handle);
        assert!(os.violations()[0].contains("clipboard-owned"));
    }

    #[test]
    fn clean_alloc_free_records_nothing() {
        let os = FakeOs::new();
        let handle = os.alloc(6).unwrap();
        os.lock(handle).unwrap();
        os.unlock(handle);
        os.free(handle);
        assert!(os.violations().is_empty());
        assert_eq!(os.freed(), vec![handle]);
    }

    // -- Publish bookkeeping --

    #[test]
    fn publish_swaps_content_and_drops_the_old_block() {
        let os = FakeOs::new();
        os.set_content_text("old");
        let old = os.text_handle().unwrap();
        let new = os.alloc(4).unwrap();
        assert!(os.publish(new));
        assert_eq!(os.text_handle(), Some(new));
        assert!(!os.block_exists(old));
        assert!(os.violations().is_empty());
    }
}
