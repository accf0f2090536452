//! Per-iteration scratch space with automatic cleanup.
//!
//! Demonstrates:
//!   1. A scope wrapping one unit of work
//!   2. Copying borrowed input into arena scratch
//!   3. The scratch vanishing on every loop exit
//!   4. The fallible path when capacity is too tight
//!
//! Run with:
//!   cargo run --example scratch

use sump::Arena;

fn main() {
    let mut scratch = Arena::new(1024);

    let inputs = [
        "temporary parsing data",
        "more transient bytes",
        "last record",
    ];

    // 1.-3. Each round gets a fresh region and gives it back.
    for (round, text) in inputs.into_iter().enumerate() {
        let scope = scratch.scope();
        let buffer = scope.alloc_str(text);
        buffer.make_ascii_uppercase();
        println!("round {round}: {buffer} ({} bytes in use)", scope.used());
    } // scope drops here — the copy is gone

    println!("after the loop: {} bytes in use", scratch.used());

    // 4. Exhaustion is an error value, not a crash, on the try path.
    let tiny = Arena::new(16);
    match tiny.try_alloc_raw(64, 1) {
        Ok(_) => println!("unexpectedly fit"),
        Err(e) => println!("tiny arena refused: {e}"),
    }
}
