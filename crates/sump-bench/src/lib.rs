//! Benchmark workloads and utilities for the sump arena.
//!
//! Provides deterministic, seeded allocation traffic for the criterion
//! benches:
//!
//! - [`mixed_layouts`]: size/alignment pairs modelling parser scratch
//! - [`record_sizes`]: record payload sizes for scope-cycle runs
//! - [`worst_case_bytes`]: capacity bound for a request list

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `n` deterministic `(size, align)` allocation requests.
///
/// Sizes are 1..=256 bytes and alignments are powers of two from 1 to
/// 64, matching the small-object traffic a parser pushes through
/// scratch space. The same seed always produces the same requests.
pub fn mixed_layouts(seed: u64, n: usize) -> Vec<(usize, usize)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let size = rng.random_range(1usize..=256);
            let align = 1usize << rng.random_range(0..7u32);
            (size, align)
        })
        .collect()
}

/// Generate `n` deterministic record payload sizes (16..=512 bytes).
pub fn record_sizes(seed: u64, n: usize) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(16usize..=512)).collect()
}

/// Upper bound on the bytes a request list can consume, padding included.
///
/// Each request costs at most its size plus `align - 1` padding bytes,
/// so an arena of this capacity always absorbs the whole list.
pub fn worst_case_bytes(reqs: &[(usize, usize)]) -> usize {
    reqs.iter().map(|&(size, align)| size + (align - 1)).sum()
}
