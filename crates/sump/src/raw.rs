//! Low-level ownership of the arena's backing memory.
//!
//! This is one of the two modules allowed to contain `unsafe` code (the
//! other is [`crate::arena`], which places values into the buffer). Every
//! `unsafe` site carries a `// SAFETY:` comment stating the invariant it
//! relies on.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::ptr::NonNull;

/// Alignment of the backing block.
///
/// Matches the natural alignment byte buffers get from the global
/// allocator, so requests at or below it land at deterministic offsets
/// from the block base.
pub(crate) const BUFFER_ALIGN: usize = 16;

/// A fixed-capacity heap block aligned to [`BUFFER_ALIGN`].
///
/// Allocated once in [`RawBuffer::new`], released once in `Drop`, never
/// grown or reallocated. A capacity of zero performs no heap allocation
/// and holds a dangling base pointer that is never dereferenced.
pub(crate) struct RawBuffer {
    /// Start of the block; dangling when `capacity == 0`.
    base: NonNull<u8>,
    /// Size of the block in bytes.
    capacity: usize,
}

impl RawBuffer {
    /// Allocate a block of exactly `capacity` bytes.
    ///
    /// Diverges via [`alloc::handle_alloc_error`] if the global allocator
    /// refuses the request. Panics if `capacity`, rounded up to
    /// [`BUFFER_ALIGN`], exceeds `isize::MAX`.
    pub(crate) fn new(capacity: usize) -> Self {
        if capacity == 0 {
            return Self {
                base: NonNull::dangling(),
                capacity: 0,
            };
        }
        let layout = match Layout::from_size_align(capacity, BUFFER_ALIGN) {
            Ok(layout) => layout,
            Err(_) => panic!("arena capacity overflow: {capacity} bytes"),
        };
        // SAFETY: `layout` has non-zero size; the `capacity == 0` case
        // returned early above.
        let ptr = unsafe { alloc::alloc(layout) };
        let base = match NonNull::new(ptr) {
            Some(base) => base,
            None => alloc::handle_alloc_error(layout),
        };
        Self { base, capacity }
    }

    /// Numeric address of the first byte of the block.
    pub(crate) fn base_addr(&self) -> usize {
        self.base.as_ptr() as usize
    }

    /// Size of the block in bytes.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether `addr` falls inside the block's half-open address range.
    ///
    /// Always false when `capacity == 0`; the dangling base owns no bytes.
    pub(crate) fn contains(&self, addr: usize) -> bool {
        let base = self.base_addr();
        // `base + capacity` cannot overflow: the allocated block fits in
        // the address space.
        addr >= base && addr < base + self.capacity
    }
}

impl Drop for RawBuffer {
    fn drop(&mut self) {
        if self.capacity == 0 {
            return;
        }
        // SAFETY: `base` was obtained from `alloc::alloc` in `new` with the
        // same size/align pair, which `new` validated; it is released
        // exactly once, here.
        unsafe {
            alloc::dealloc(
                self.base.as_ptr(),
                Layout::from_size_align_unchecked(self.capacity, BUFFER_ALIGN),
            );
        }
    }
}

// SAFETY: `RawBuffer` exclusively owns its allocation, and no handle into
// the block outlives the owning arena. Moving the buffer to another thread
// moves that ownership with it.
unsafe impl Send for RawBuffer {}
