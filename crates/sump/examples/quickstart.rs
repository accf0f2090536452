//! Sump quickstart — the smallest useful tour of the arena.
//!
//! Demonstrates:
//!   1. Creating a fixed-capacity arena
//!   2. Raw and typed allocation
//!   3. Watching the accounting (used / remaining)
//!   4. Rolling back to a checkpoint
//!   5. Releasing everything with reset
//!
//! Run with:
//!   cargo run --example quickstart

use sump::Arena;

fn main() {
    println!("=== Sump Quickstart ===\n");

    // 1. One up-front block; the arena never grows past it.
    let mut arena = Arena::new(1024);
    println!("Capacity: {} bytes", arena.capacity());

    // 2. Raw reservations, like the C-style callers the arena serves.
    let p1 = arena.alloc_raw(32, 1);
    let p2 = arena.alloc_raw(64, 8);
    println!("Reserved 32 + 64 bytes at {p1:p} and {p2:p}");

    // 3. Typed allocation hands back an ordinary reference.
    let answer = arena.alloc(42u64);
    println!("Typed value in the arena: {answer}");

    println!(
        "Used: {} bytes ({} remaining)",
        arena.used(),
        arena.remaining()
    );

    // 4. Everything allocated after a mark is released by one rewind.
    let mark = arena.mark();
    arena.alloc_slice::<u8>(100);
    println!("With scratch: {} bytes used", arena.used());
    arena.rewind(mark);
    println!("After rewind: {} bytes used", arena.used());

    // 5. One store releases the lot.
    arena.reset();
    println!("After reset: {} bytes used", arena.used());
}
