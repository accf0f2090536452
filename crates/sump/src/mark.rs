//! Checkpoint values for rewinding an arena.
//!
//! A [`Mark`] captures the arena's bump offset at a point in time. Passing
//! it back to [`Arena::rewind`](crate::Arena::rewind) releases every
//! allocation made after the capture in one O(1) step.

use std::fmt;

/// A saved bump position within an [`Arena`](crate::Arena).
///
/// Marks are plain values: cheap to copy, carrying no identity of the
/// arena they came from and no validity tracking. Capturing one is O(1)
/// and rewinding to one whose offset does not fit the target arena is a
/// bounded no-op, so a stale mark can never corrupt bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct Mark {
    /// Byte offset captured from the arena.
    pub(crate) offset: usize,
}

impl Mark {
    /// Create a mark at `offset`.
    pub(crate) fn new(offset: usize) -> Self {
        Self { offset }
    }

    /// The byte offset this mark rewinds to.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mark(off={})", self.offset)
    }
}
