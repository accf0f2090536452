//! Scoped regions — rewind on drop, nesting, and keeping results.
//!
//! Demonstrates:
//!   1. used() before / inside / after a scope
//!   2. Values allocated through the scope
//!   3. Nested scopes unwinding innermost-first
//!   4. leak() to keep a region's allocations
//!
//! Run with:
//!   cargo run --example scoped

use sump::Arena;

fn main() {
    let mut arena = Arena::new(4096);
    println!("before: {} bytes", arena.used());

    // 1.+2. A scope reclaims its temporaries automatically.
    {
        let scope = arena.scope();
        let t1 = scope.alloc(10i32);
        let t2 = scope.alloc(20i32);
        println!("inside scope: {} bytes", scope.used());
        println!("temps: {t1}, {t2}");
    }
    println!("after scope: {} bytes", arena.used());

    // 3. Nesting: each level restores its own entry position.
    {
        let mut outer = arena.scope();
        outer.alloc_slice::<u8>(100);
        println!("outer holds: {} bytes", outer.used());
        {
            let inner = outer.nest();
            inner.alloc_slice::<u8>(900);
            println!("inner holds: {} bytes", inner.used());
        }
        println!("inner unwound: {} bytes", outer.used());
    }
    println!("all unwound: {} bytes", arena.used());

    // 4. leak() keeps the region: the bytes stay reserved after the
    //    scope object itself is gone.
    {
        let scope = arena.scope();
        scope.alloc_slice::<u64>(64);
        scope.leak();
    }
    println!("after leak: {} bytes kept", arena.used());
}
