//! Scoped scratch regions that rewind automatically.
//!
//! [`Scope`] pairs a [`Mark`] with exclusive access to the [`Arena`] that
//! produced it. Allocations made through the scope are released when it
//! drops — on normal exit, early return, or panic — so temporaries are
//! reclaimed on every exit path without manual bookkeeping.

use std::ops::Deref;

use crate::arena::Arena;
use crate::mark::Mark;

/// An RAII region of an [`Arena`].
///
/// Created by [`Arena::scope`]. The scope captures the bump position on
/// entry and rewinds to it when dropped, releasing every allocation made
/// inside the region in one step. [`Scope::leak`] defuses that and keeps
/// the region's allocations instead.
///
/// The scope derefs to [`Arena`], so the whole allocation and query
/// surface is available on it. There is intentionally no `DerefMut`:
/// `rewind`, `reset`, and `scope` stay unreachable while a scope holds
/// the rewind responsibility. Nesting goes through [`Scope::nest`], which
/// the borrow checker forces to unwind innermost-first.
///
/// Moving a scope moves the responsibility with it; each scope rewinds
/// exactly once, or never if leaked.
#[must_use = "a scope that is not held rewinds the arena immediately"]
pub struct Scope<'a> {
    /// The arena this scope is responsible for.
    arena: &'a mut Arena,
    /// Bump position captured when the scope was opened.
    mark: Mark,
    /// Cleared by `leak`; a defused scope does not rewind.
    active: bool,
}

impl<'a> Scope<'a> {
    /// Open a scope at the arena's current position.
    pub(crate) fn new(arena: &'a mut Arena) -> Self {
        let mark = arena.mark();
        Self {
            arena,
            mark,
            active: true,
        }
    }

    /// The checkpoint this scope rewinds to when it ends.
    ///
    /// Note that `scope.mark()` (through deref) captures the arena's
    /// *current* position instead.
    pub fn entry_mark(&self) -> Mark {
        self.mark
    }

    /// Open a child scope inside this one.
    ///
    /// The child borrows the parent, so the parent is unusable until the
    /// child ends, and each level restores the position it opened at.
    pub fn nest(&mut self) -> Scope<'_> {
        Scope::new(&mut *self.arena)
    }

    /// Keep every allocation made under this scope.
    ///
    /// Consumes the scope without rewinding; the arena's bump position
    /// stays where the scope's allocations left it.
    pub fn leak(mut self) {
        self.active = false;
    }
}

impl Deref for Scope<'_> {
    type Target = Arena;

    fn deref(&self) -> &Arena {
        self.arena
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        if self.active {
            self.arena.rewind(self.mark);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_rewinds_on_drop() {
        let mut arena = Arena::new(128);
        arena.alloc_slice::<u8>(7);
        {
            let scope = arena.scope();
            scope.alloc_slice::<u8>(64);
            assert_eq!(scope.used(), 71);
        }
        assert_eq!(arena.used(), 7);
    }

    #[test]
    fn allocations_flow_through_the_scope() {
        let mut arena = Arena::new(128);
        {
            let scope = arena.scope();
            let n = scope.alloc(11u8);
            assert_eq!(*n, 11);
            assert_eq!(scope.used(), 1);
            assert!(scope.owns(std::ptr::from_mut(n)));
        }
        assert!(arena.is_empty());
    }

    #[test]
    fn leak_keeps_the_scopes_allocations() {
        let mut arena = Arena::new(128);
        {
            let scope = arena.scope();
            scope.alloc_slice::<u8>(48);
            scope.leak();
        }
        assert_eq!(arena.used(), 48);
    }

    #[test]
    fn nested_scopes_unwind_innermost_first() {
        let mut arena = Arena::new(256);
        let mut outer = arena.scope();
        outer.alloc_slice::<u8>(8);
        {
            let inner = outer.nest();
            inner.alloc_slice::<u8>(16);
            assert_eq!(inner.used(), 24);
        }
        assert_eq!(outer.used(), 8);
        drop(outer);
        assert!(arena.is_empty());
    }

    #[test]
    fn entry_mark_is_the_opening_position() {
        let mut arena = Arena::new(64);
        arena.alloc_slice::<u8>(10);
        let scope = arena.scope();
        assert_eq!(scope.entry_mark().offset(), 10);
        assert_eq!(scope.mark().offset(), 10); // deref: current == entry so far
        scope.alloc_slice::<u8>(5);
        assert_eq!(scope.mark().offset(), 15);
        assert_eq!(scope.entry_mark().offset(), 10);
    }

    #[test]
    fn moving_a_scope_moves_the_rewind_duty() {
        let mut arena = Arena::new(128);
        {
            let scope = arena.scope();
            scope.alloc_slice::<u8>(32);
            let carried = scope; // no rewind on the move itself
            assert_eq!(carried.used(), 32);
        }
        assert!(arena.is_empty());
    }

    // Mirrors a scratch workflow that bails out halfway: the scope must
    // clean up on the error path and keep results on the success path.
    fn build_record(arena: &mut Arena, fail: bool) -> Result<usize, ()> {
        let scope = arena.scope();
        scope.alloc_slice::<u8>(64);
        if fail {
            return Err(());
        }
        let total = scope.used();
        scope.leak();
        Ok(total)
    }

    #[test]
    fn early_return_still_rewinds() {
        let mut arena = Arena::new(256);
        assert!(build_record(&mut arena, true).is_err());
        assert!(arena.is_empty());
        assert_eq!(build_record(&mut arena, false), Ok(64));
        assert_eq!(arena.used(), 64);
    }
}
