//! Arena-backed records — structs, strings, and arrays without free().
//!
//! Demonstrates:
//!   1. Moving a struct into the arena
//!   2. Arena-owned strings referenced by arena-owned structs
//!   3. Default-initialised arrays filled in place
//!   4. Accounting after mixed allocations
//!
//! Run with:
//!   cargo run --example objects

use sump::Arena;

/// A record whose name lives in the same arena as the record itself.
struct User<'a> {
    id: u32,
    name: &'a str,
}

fn main() {
    let arena = Arena::new(8192);

    // 1.+2. The string and the struct both come out of the block.
    let name = arena.alloc_str("Alice");
    let user = arena.alloc(User { id: 1, name });
    println!("{} {}", user.id, user.name);

    // 3. A default-initialised array, then filled in place.
    let numbers = arena.alloc_slice::<i32>(5);
    for (i, slot) in numbers.iter_mut().enumerate() {
        *slot = (i as i32) * 10;
    }
    println!("{numbers:?}");

    // 4. Everything above shares one allocation.
    println!("Used: {} of {} bytes", arena.used(), arena.capacity());
}
