//! Benchmark profiles for Vessel containers.
//!
//! Shared workload builders used by the criterion benches, so every bench
//! measures the same shapes of data.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use vessel_vec::Vector;

/// A vector of `n` strings, each a few bytes long and heap-allocated.
pub fn string_vector(n: usize) -> Vector<String> {
    (0..n).map(|i| format!("item-{i}")).collect()
}

/// Deterministic insertion positions for a vector growing from empty.
///
/// Position `k` is always a valid insertion point for a vector of length
/// `k`, and the sequence mixes front, middle and back insertions.
pub fn insertion_positions(n: usize) -> Vec<usize> {
    (0..n)
        .map(|k| match k % 3 {
            0 => 0,
            1 => k / 2,
            _ => k,
        })
        .collect()
}
