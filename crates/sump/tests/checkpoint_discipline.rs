//! Integration test: checkpoint discipline over batch workloads.
//!
//! Drives one arena through the allocation patterns the crate exists
//! for — per-record scratch, stacked checkpoints, scoped unwinding with
//! early exits, exhaustion fallback, and reset between batches — and
//! verifies the bump position always lands exactly where the
//! checkpoints say it must.

use sump::{Arena, ArenaError};

// ── Helpers that mimic a record-crunching pipeline ───────────────────

const SCRATCH_CAPACITY: usize = 4096;
const ENTRY_BYTES: usize = 32;

/// Tokenise `payload` in arena scratch and fold a checksum over the
/// token lengths. All scratch dies with the scope before returning.
fn crunch_record(arena: &mut Arena, payload: &str) -> u64 {
    let scope = arena.scope();
    let copy = scope.alloc_str(payload);
    let mut sum = 0u64;
    for token in copy.split(',') {
        let bytes = scope.alloc_slice_copy(token.as_bytes());
        sum += bytes.len() as u64;
    }
    sum
}

/// Append fixed-size entries until the arena runs out or `entries` are
/// stored; the stored entries are kept past the scope.
fn fill_batch(arena: &mut Arena, entries: usize) -> usize {
    let scope = arena.scope();
    let mut stored = 0;
    for _ in 0..entries {
        if scope.try_alloc_raw(ENTRY_BYTES, 8).is_err() {
            break;
        }
        stored += 1;
    }
    scope.leak();
    stored
}

/// Parse `payload` as `key=value` in arena scratch; a payload without
/// `=` bails out early. Scratch dies with the scope either way.
fn parse_entry(arena: &mut Arena, payload: &str) -> Result<usize, ()> {
    let scope = arena.scope();
    let copy = scope.alloc_str(payload);
    let eq = copy.find('=').ok_or(())?;
    let value = scope.alloc_str(&copy[eq + 1..]);
    Ok(value.len())
}

// ── Scenarios ────────────────────────────────────────────────────────

/// A hundred records flow through a 4 KiB arena whose total traffic far
/// exceeds its capacity; per-record scopes must return it to empty every
/// time.
#[test]
fn per_record_scratch_stays_bounded() {
    let mut arena = Arena::new(SCRATCH_CAPACITY);
    let mut total = 0u64;
    for i in 0..100 {
        let payload = format!("sensor-{i},ok,23.5,flagged");
        total += crunch_record(&mut arena, &payload);
        assert!(arena.is_empty(), "record {i} leaked scratch");
    }
    assert!(total > 0);
}

/// Batch / record / field checkpoints release in strict stack order.
#[test]
fn checkpoint_stack_unwinds_level_by_level() {
    let mut arena = Arena::new(1024);
    let batch = arena.mark();
    arena.alloc_slice::<u8>(100);
    let record = arena.mark();
    arena.alloc_slice::<u8>(50);
    let field = arena.mark();
    arena.alloc_slice::<u8>(25);
    assert_eq!(arena.used(), 175);

    arena.rewind(field);
    assert_eq!(arena.used(), 150);
    arena.rewind(record);
    assert_eq!(arena.used(), 100);
    arena.rewind(batch);
    assert!(arena.is_empty());
}

/// Exhaustion surfaces full context through the fallible path and a
/// rewind makes the space usable again.
#[test]
fn exhaustion_reports_context_and_recovers() {
    let mut arena = Arena::new(64);
    let keep = arena.mark();
    while arena.try_alloc_raw(16, 1).is_ok() {}
    assert_eq!(
        arena.try_alloc_raw(16, 1).unwrap_err(),
        ArenaError::OutOfCapacity {
            requested: 16,
            remaining: 0
        }
    );
    arena.rewind(keep);
    assert!(
        arena.try_alloc_raw(16, 1).is_ok(),
        "rewind must free the space"
    );
}

/// A malformed record bails out mid-parse; the scope still cleans up.
#[test]
fn early_bailout_leaves_no_scratch_behind() {
    let mut arena = Arena::new(256);
    assert_eq!(parse_entry(&mut arena, "mode=turbo"), Ok(5));
    assert!(arena.is_empty());
    assert_eq!(parse_entry(&mut arena, "malformed record"), Err(()));
    assert!(arena.is_empty(), "failed parse leaked scratch");
}

/// Callers that overflow the arena fall back to the heap and keep going.
#[test]
fn fallback_path_when_scratch_is_tight() {
    let arena = Arena::new(32);
    let mut spill: Vec<u8> = Vec::new();
    for chunk in 0u8..8 {
        match arena.try_alloc_raw(16, 1) {
            Ok(_) => {}
            Err(ArenaError::OutOfCapacity { .. }) => spill.push(chunk),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    // Two 16-byte chunks fit a 32-byte arena; the rest spill.
    assert_eq!(spill, vec![2, 3, 4, 5, 6, 7]);
}

/// Leaked scopes accumulate a batch; reset ships it and starts over.
#[test]
fn batches_accumulate_until_shipped() {
    let mut arena = Arena::new(512);
    let first = fill_batch(&mut arena, 4);
    assert_eq!(first, 4);
    let rest = fill_batch(&mut arena, 1000);
    assert_eq!(rest, 12, "remaining space holds twelve more entries");
    assert_eq!(arena.remaining(), 0);

    arena.reset();
    assert_eq!(fill_batch(&mut arena, 1000), 16);
}

/// After a reset the very same bytes serve the next batch.
#[test]
fn reset_hands_the_same_bytes_to_the_next_batch() {
    let mut arena = Arena::new(64);
    let first = arena.alloc_slice_copy(b"old batch data");
    let first_addr = first.as_ptr() as usize;
    arena.reset();
    let second = arena.alloc_slice_copy(b"new batch");
    assert_eq!(
        second.as_ptr() as usize,
        first_addr,
        "block must be reused from the start"
    );
    assert_eq!(second, b"new batch");
}
