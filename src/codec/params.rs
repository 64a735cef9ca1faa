//! Tunable parameters and the geometry derived from them.
//!
//! [`Params`] is the plain value type the callers fill in (the CLI maps its
//! flags straight onto it); [`Geometry`] holds everything the drivers derive
//! from it once per operation:
//!
//! - `l` — rolling-hash window length, `round_up_pow2(smallest_len / 2)`;
//! - `k` — indexing/lookup stride, the largest power of two whose square
//!   does not exceed `l`;
//! - `probes` — hash positions probed per `l`-sized sub-block,
//!   `min(k * amplifier, l)`;
//! - hash-index sizing and the slot masks used to pack `(position, chksum)`
//!   pairs into 32-bit slots.
//!
//! Out-of-range parameters are clamped silently (never rejected): the
//! operation proceeds with the nearest usable value.

use crate::config::{
    DEFAULT_AMPLIFIER, DEFAULT_BARRIER, DEFAULT_BLOCK_SIZE, DEFAULT_HASH_BITS,
    DEFAULT_MIN_COMPRESSION, DEFAULT_MIN_MATCH_LEN, DEFAULT_SMALLEST_LEN, GB, MIN_BLOCK_SIZE,
    MIN_MATCH_FLOOR,
};

/// Hard ceiling on the window size.  Positions are packed into 32-bit index
/// slots, so the window must stay addressable in 31 bits.
pub const MAX_BLOCK_SIZE: usize = 2 * GB;

// ─────────────────────────────────────────────────────────────────────────────
// Power-of-two helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Smallest power of two that is `>= x` (and at least 1).
#[inline]
pub fn round_up_pow2(x: usize) -> usize {
    x.max(1).next_power_of_two()
}

/// Largest power of two that is `<= x`.  `x` must be non-zero.
#[inline]
pub fn floor_pow2(x: usize) -> usize {
    debug_assert!(x > 0);
    1 << (usize::BITS - 1 - x.leading_zeros())
}

/// Largest power of two whose square is `<= x` (i.e. `floor(sqrt(x))`
/// rounded down to a power of two).  `x` must be non-zero.
#[inline]
pub fn floor_sqrt_pow2(x: usize) -> usize {
    debug_assert!(x > 0);
    let mut k = 1usize;
    while (k * 2) * (k * 2) <= x {
        k *= 2;
    }
    k
}

// ─────────────────────────────────────────────────────────────────────────────
// Params
// ─────────────────────────────────────────────────────────────────────────────

/// Caller-visible tunables for one compress or decompress operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    /// Sliding-window size in bytes; also the largest representable offset
    /// plus one.  Clamped into `[MIN_BLOCK_SIZE, MAX_BLOCK_SIZE]`.
    pub block_size: usize,
    /// Minimum accepted length for matches with `offset < barrier`.
    pub min_match_len: usize,
    /// Offset separating near matches (held to `min_match_len`) from far
    /// matches (held to `smallest_len`).
    pub barrier: usize,
    /// Minimum accepted length for matches with `offset >= barrier`.
    /// Clamped to `min_match_len` when larger.
    pub smallest_len: usize,
    /// Log2 of the hash-index slot count; 0 selects automatic sizing.
    pub hash_bits: u32,
    /// Probe-rate multiplier, >= 1.  Larger values probe more candidate
    /// positions per sub-block, trading speed for ratio.
    pub amplifier: usize,
    /// Informational threshold in percent of the input size.  The codec
    /// itself never enforces it.
    pub min_compression: u32,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            block_size: DEFAULT_BLOCK_SIZE,
            min_match_len: DEFAULT_MIN_MATCH_LEN,
            barrier: DEFAULT_BARRIER,
            smallest_len: DEFAULT_SMALLEST_LEN,
            hash_bits: DEFAULT_HASH_BITS,
            amplifier: DEFAULT_AMPLIFIER,
            min_compression: DEFAULT_MIN_COMPRESSION,
        }
    }
}

impl Params {
    /// Returns a copy with every field forced into its usable range.
    ///
    /// Clamping is silent: the operation runs with the adjusted values.
    pub fn clamped(&self) -> Params {
        let mut p = *self;
        p.block_size = p.block_size.clamp(MIN_BLOCK_SIZE, MAX_BLOCK_SIZE);
        p.min_match_len = p.min_match_len.max(MIN_MATCH_FLOOR);
        // smallest_len must not exceed min_match_len, nor shrink below the
        // floor that keeps the hash window meaningful, nor grow the hash
        // window beyond a small fraction of the block.
        p.smallest_len = p
            .smallest_len
            .min(p.min_match_len)
            .min(p.block_size / 8)
            .max(MIN_MATCH_FLOOR);
        p.amplifier = p.amplifier.max(1);
        p
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Geometry
// ─────────────────────────────────────────────────────────────────────────────

/// Values derived from [`Params`] once per operation.
///
/// All of `l`, `k`, and `hash_size` are powers of two; the packing masks
/// depend on that (`pos & pos_mask` and `slot & chk_mask` must be exact).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Rolling-hash window length in bytes.
    pub l: usize,
    /// Indexing/lookup stride.
    pub k: usize,
    /// Hash positions probed out of every `l` consecutive ones.
    pub probes: usize,
    /// Number of 32-bit slots in the hash index.
    pub hash_size: usize,
    /// `hash_size - 1`.
    pub hash_mask: usize,
    /// Low-bit mask carrying the slot's partial checksum (`k - 1`).
    pub chk_mask: u32,
    /// High-bit mask carrying the slot's recorded position (`!(k - 1)`).
    pub pos_mask: u32,
}

impl Geometry {
    /// Derive the operation geometry from already-clamped parameters.
    pub fn derive(p: &Params) -> Geometry {
        let l = round_up_pow2(p.smallest_len / 2);
        let k = floor_sqrt_pow2(l);
        let probes = (k * p.amplifier).min(l);

        // Auto sizing: about two thirds of the window, one slot per stride
        // position, never more than a quarter of the window in table bytes.
        let hash_size = if p.hash_bits > 0 {
            1usize << p.hash_bits.min(31)
        } else {
            (round_up_pow2(p.block_size * 2 / 3) / k.max(16)).max(1 << 10)
        };

        let chk_mask = (k - 1) as u32;
        Geometry {
            l,
            k,
            probes,
            hash_size,
            hash_mask: hash_size - 1,
            chk_mask,
            pos_mask: !chk_mask,
        }
    }
}
