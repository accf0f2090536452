//! The arena core: one fixed block, a bump offset, O(1) release.
//!
//! [`Arena`] owns a raw heap block and a byte offset into it. Allocation
//! rounds the offset up for alignment, advances it past the request, and
//! hands back the gap. Releasing memory is offset arithmetic only:
//! [`Arena::rewind`] to a [`Mark`], or [`Arena::reset`] to empty. Nothing
//! placed in the arena is ever individually freed or dropped.
//!
//! Allocation takes `&self` (the offset lives in a [`Cell`]) so any number
//! of returned references can be live at once. The destructive operations
//! take `&mut self`, so rewinding while an arena reference is still live
//! is a borrow-check error rather than a runtime hazard.

#![allow(unsafe_code)]
// Handing out `&mut T` from `&self` is the whole point of a bump arena;
// soundness rests on the disjointness argument in each SAFETY comment.
#![allow(clippy::mut_from_ref)]

use std::cell::Cell;
use std::mem;
use std::ptr::NonNull;
use std::slice;
use std::str;

use crate::error::ArenaError;
use crate::mark::Mark;
use crate::raw::RawBuffer;
use crate::scope::Scope;

/// A fixed-capacity bump allocator.
///
/// The backing block is allocated once at construction (aligned to 16
/// bytes), never grows, and is freed when the arena drops. Every
/// allocation is a constant-time offset bump; every release is a
/// constant-time offset store. Alignment padding counts against
/// [`used`](Arena::used) and is only reclaimed by rewinding.
///
/// `Arena` is `Send` but deliberately not `Sync`: move it between
/// threads, never share it. Use one arena per thread.
///
/// # Example
///
/// ```
/// use sump::Arena;
///
/// let mut arena = Arena::new(256);
/// let n = arena.alloc(41u32);
/// *n += 1;
/// assert_eq!(*n, 42);
///
/// let mark = arena.mark();
/// arena.alloc_slice::<u64>(8);
/// arena.rewind(mark);
/// assert_eq!(arena.used(), 4);
/// ```
pub struct Arena {
    /// Backing block; fixed for the arena's lifetime.
    buf: RawBuffer,
    /// Next free byte, relative to the block base. Invariant: `<= capacity`.
    offset: Cell<usize>,
}

impl Arena {
    /// Create an arena with exactly `capacity` bytes of backing storage.
    ///
    /// A capacity of zero is valid; every allocation against it fails.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds `isize::MAX`. Diverges via
    /// [`std::alloc::handle_alloc_error`] if the global allocator refuses
    /// the block.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: RawBuffer::new(capacity),
            offset: Cell::new(0),
        }
    }

    /// Total size of the backing block in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Bytes consumed so far, alignment padding included.
    pub fn used(&self) -> usize {
        self.offset.get()
    }

    /// Bytes still available before the arena is exhausted.
    pub fn remaining(&self) -> usize {
        self.buf.capacity() - self.offset.get()
    }

    /// Whether nothing is currently allocated.
    pub fn is_empty(&self) -> bool {
        self.offset.get() == 0
    }

    /// Reserve `size` bytes at `align` alignment, or report why not.
    ///
    /// A `size` of zero is treated as one byte, so every successful call
    /// returns a distinct address. `align` must be a power of two.
    /// Returns `Err(ArenaError::InvalidAlignment)` for a bad alignment and
    /// `Err(ArenaError::OutOfCapacity)` when the request (padding
    /// included) does not fit; a failed call leaves the arena unchanged.
    pub fn try_alloc_raw(&self, size: usize, align: usize) -> Result<NonNull<u8>, ArenaError> {
        // Zero-byte requests still consume one byte so that distinct
        // allocations never share an address.
        let size = size.max(1);
        if !align.is_power_of_two() {
            return Err(ArenaError::InvalidAlignment { alignment: align });
        }
        let base = self.buf.base_addr();
        let current = base + self.offset.get();
        let aligned = match current.checked_add(align - 1) {
            // Rounding up wrapped the address space; nothing can satisfy this.
            None => return Err(self.out_of_capacity(size)),
            Some(bumped) => bumped & !(align - 1),
        };
        let new_offset = match (aligned - base).checked_add(size) {
            None => return Err(self.out_of_capacity(size)),
            Some(end) => end,
        };
        if new_offset > self.buf.capacity() {
            return Err(self.out_of_capacity(size));
        }
        self.offset.set(new_offset);
        // SAFETY: `aligned >= current >= base`, and `base` is non-null for
        // any arena that reaches this point — a zero-capacity arena fails
        // the capacity check above.
        Ok(unsafe { NonNull::new_unchecked(aligned as *mut u8) })
    }

    /// Reserve `size` bytes at `align` alignment.
    ///
    /// Same contract as [`Arena::try_alloc_raw`], for call sites that
    /// treat exhaustion as a bug.
    ///
    /// # Panics
    ///
    /// Panics with the corresponding [`ArenaError`] message if the
    /// alignment is invalid or the request does not fit.
    pub fn alloc_raw(&self, size: usize, align: usize) -> NonNull<u8> {
        match self.try_alloc_raw(size, align) {
            Ok(ptr) => ptr,
            Err(err) => panic!("{err}"),
        }
    }

    /// Move `value` into the arena and return a reference to it.
    ///
    /// The value is never dropped: rewinding or resetting simply forgets
    /// it. Types that own heap resources will leak them, so the arena is
    /// best suited to plain data. A zero-sized `value` still consumes one
    /// byte, keeping addresses distinct.
    ///
    /// # Panics
    ///
    /// Panics if the arena cannot fit the value.
    pub fn alloc<T>(&self, value: T) -> &mut T {
        let ptr = self
            .alloc_raw(mem::size_of::<T>(), mem::align_of::<T>())
            .cast::<T>();
        // SAFETY: `ptr` is non-null, aligned for `T`, and covers bytes the
        // bump offset just moved past. No live reference overlaps them:
        // handing bytes out twice requires `rewind`/`reset`, which take
        // `&mut self` and therefore end this borrow first.
        unsafe {
            ptr.as_ptr().write(value);
            &mut *ptr.as_ptr()
        }
    }

    /// Allocate a slice of `len` default-initialised elements.
    ///
    /// `len == 0` returns an empty slice without consuming any bytes.
    ///
    /// # Panics
    ///
    /// Panics if the total byte size cannot fit in the arena.
    pub fn alloc_slice<T: Default>(&self, len: usize) -> &mut [T] {
        if len == 0 {
            return &mut [];
        }
        // An overflowing byte size can never fit; saturate and let the
        // capacity check reject it.
        let bytes = mem::size_of::<T>().checked_mul(len).unwrap_or(usize::MAX);
        let ptr = self.alloc_raw(bytes, mem::align_of::<T>()).cast::<T>();
        // SAFETY: `ptr` is aligned for `T` and covers `len` elements of
        // freshly reserved, unaliased bytes (see `alloc`); each element is
        // initialised before the slice is formed.
        unsafe {
            for i in 0..len {
                ptr.as_ptr().add(i).write(T::default());
            }
            slice::from_raw_parts_mut(ptr.as_ptr(), len)
        }
    }

    /// Copy `src` into the arena and return the arena-owned slice.
    ///
    /// An empty `src` returns an empty slice without consuming any bytes.
    ///
    /// # Panics
    ///
    /// Panics if the arena cannot fit the copy.
    pub fn alloc_slice_copy<T: Copy>(&self, src: &[T]) -> &mut [T] {
        if src.is_empty() {
            return &mut [];
        }
        let ptr = self
            .alloc_raw(mem::size_of_val(src), mem::align_of::<T>())
            .cast::<T>();
        // SAFETY: the destination is freshly reserved and unaliased (see
        // `alloc`), so it cannot overlap `src` — live borrows only ever
        // point below the old offset. Count and alignment match `src`.
        unsafe {
            ptr.as_ptr().copy_from_nonoverlapping(src.as_ptr(), src.len());
            slice::from_raw_parts_mut(ptr.as_ptr(), src.len())
        }
    }

    /// Copy `s` into the arena and return the arena-owned string slice.
    ///
    /// # Panics
    ///
    /// Panics if the arena cannot fit the copy.
    pub fn alloc_str(&self, s: &str) -> &mut str {
        let bytes = self.alloc_slice_copy(s.as_bytes());
        // Copied verbatim from `s`, so the bytes are valid UTF-8.
        str::from_utf8_mut(bytes).expect("arena copy preserves UTF-8")
    }

    /// Whether `ptr` points into this arena's backing block.
    ///
    /// A pure address-range test over `[base, base + capacity)`; the
    /// pointer is never dereferenced and need not be live. Always false
    /// for a zero-capacity arena.
    pub fn owns<T>(&self, ptr: *const T) -> bool {
        self.buf.contains(ptr as usize)
    }

    /// Capture the current bump position as a [`Mark`].
    pub fn mark(&self) -> Mark {
        Mark::new(self.offset.get())
    }

    /// Roll the bump position back (or forward) to `mark`.
    ///
    /// Everything allocated after the mark was captured is released in
    /// one step; the bytes are not touched, merely made available again.
    /// A mark whose offset exceeds this arena's capacity — one captured
    /// from a larger arena — is ignored. A mark from a *different* arena
    /// that happens to fit is indistinguishable from a local one and will
    /// move the offset; keep marks with the arena they came from.
    pub fn rewind(&mut self, mark: Mark) {
        if mark.offset <= self.buf.capacity() {
            self.offset.set(mark.offset);
        }
    }

    /// Release everything: roll the bump position back to zero.
    ///
    /// Equivalent to rewinding a mark captured at construction. The
    /// backing block is retained and its contents are left as-is until
    /// overwritten by later allocations.
    pub fn reset(&mut self) {
        self.offset.set(0);
    }

    /// Open a [`Scope`] that rewinds to the current position when dropped.
    ///
    /// While the scope is live the arena is reachable only through it,
    /// which pins the rewind responsibility to exactly one owner.
    pub fn scope(&mut self) -> Scope<'_> {
        Scope::new(self)
    }

    fn out_of_capacity(&self, requested: usize) -> ArenaError {
        ArenaError::OutOfCapacity {
            requested,
            remaining: self.remaining(),
        }
    }
}

impl Default for Arena {
    /// A zero-capacity arena; every allocation against it fails.
    fn default() -> Self {
        Self::new(0)
    }
}
