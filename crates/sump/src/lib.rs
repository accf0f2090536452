//! Fixed-capacity bump arena with checkpoint rewind.
//!
//! One contiguous block is allocated up front and never grows. Allocation
//! bumps a byte offset; release rolls the offset back — to a saved
//! [`Mark`], to zero via [`Arena::reset`], or automatically when a
//! [`Scope`] ends. There is no per-object free and nothing placed in the
//! arena is ever dropped, which makes the arena a good home for frame
//! scratch space, parser temporaries, and batch builders — and a poor one
//! for values that own resources.
//!
//! # Architecture
//!
//! ```text
//! Arena (bump core: offset in a Cell; alloc takes &self, rewind &mut self)
//! ├── RawBuffer (raw.rs — owns the heap block; alloc/dealloc unsafe)
//! ├── Mark     (copyable checkpoint: a saved offset)
//! └── Scope    (RAII guard: rewinds to its mark on drop, derefs to Arena)
//! ```
//!
//! # Guarantees
//!
//! - Allocation, rewind, and reset are O(1); no per-object bookkeeping.
//! - Returned references satisfy the requested alignment; padding counts
//!   against [`Arena::used`].
//! - `rewind` and `reset` take `&mut self`, so a reference into released
//!   memory is a borrow-check error, not a runtime hazard.
//! - [`Arena`] is `Send` and deliberately not `Sync`: one arena per
//!   thread, moved rather than shared.
//!
//! `unsafe` is confined to `raw.rs` and `arena.rs`; every site carries a
//! `// SAFETY:` comment.
//!
//! # Quick start
//!
//! ```
//! use sump::Arena;
//!
//! let mut arena = Arena::new(4096);
//!
//! // Typed allocations borrow the arena.
//! let id = arena.alloc(17u64);
//! *id += 1;
//! assert_eq!(*id, 18);
//!
//! // A scope reclaims everything allocated inside it.
//! let before = arena.used();
//! {
//!     let scope = arena.scope();
//!     let scratch = scope.alloc_slice::<u8>(1024);
//!     scratch[0] = b'!';
//!     assert!(scope.used() > before);
//! }
//! assert_eq!(arena.used(), before);
//!
//! // Or release everything at once.
//! arena.reset();
//! assert!(arena.is_empty());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod arena;
pub mod error;
pub mod mark;
mod raw;
pub mod scope;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use error::ArenaError;
pub use mark::Mark;
pub use scope::Scope;
