//! Deterministic synthetic data for tests and benchmarks.
//!
//! All generators are pure functions of their arguments, so every test run
//! and benchmark sees identical bytes.  Pseudo-random data comes from XXH32
//! in counter mode: block `i` of four bytes is `xxh32(i.to_le_bytes(),
//! seed)`.  That is nowhere near cryptographic and does not need to be —
//! it just has to be incompressible to a matcher looking for runs of 32+
//! equal bytes.

use xxhash_rust::xxh32::xxh32;

/// `len` bytes of seeded pseudo-random data.
pub fn pseudo_random(len: usize, seed: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut counter = 0u64;
    while out.len() < len {
        let word = xxh32(&counter.to_le_bytes(), seed);
        let take = (len - out.len()).min(4);
        out.extend_from_slice(&word.to_le_bytes()[..take]);
        counter += 1;
    }
    out
}

/// `pattern` repeated (and truncated) to exactly `len` bytes.
pub fn repeating(pattern: &[u8], len: usize) -> Vec<u8> {
    assert!(!pattern.is_empty());
    pattern.iter().copied().cycle().take(len).collect()
}
