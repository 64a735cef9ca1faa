//! Parameter clamping and geometry derivation: the power-of-two laws that
//! the slot packing and the skip arithmetic depend on.

use lrep::codec::params::{
    floor_pow2, floor_sqrt_pow2, round_up_pow2, Geometry, Params, MAX_BLOCK_SIZE,
};
use lrep::config::{MIN_BLOCK_SIZE, MIN_MATCH_FLOOR};

const KB: usize = 1 << 10;
const MB: usize = 1 << 20;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn round_up_pow2_basics() {
    assert_eq!(round_up_pow2(0), 1);
    assert_eq!(round_up_pow2(1), 1);
    assert_eq!(round_up_pow2(3), 4);
    assert_eq!(round_up_pow2(16), 16);
    assert_eq!(round_up_pow2(17), 32);
}

#[test]
fn floor_pow2_basics() {
    assert_eq!(floor_pow2(1), 1);
    assert_eq!(floor_pow2(2), 2);
    assert_eq!(floor_pow2(3), 2);
    assert_eq!(floor_pow2(1023), 512);
    assert_eq!(floor_pow2(1024), 1024);
}

#[test]
fn floor_sqrt_pow2_basics() {
    // Largest power of two whose square fits.
    assert_eq!(floor_sqrt_pow2(16), 4);
    assert_eq!(floor_sqrt_pow2(32), 4); // floor(sqrt 32) = 5 -> 4
    assert_eq!(floor_sqrt_pow2(64), 8);
    assert_eq!(floor_sqrt_pow2(512), 16);
    assert_eq!(floor_sqrt_pow2(4096), 64);
}

// ─────────────────────────────────────────────────────────────────────────────
// Clamping
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn smallest_len_clamps_to_min_match_len() {
    let p = Params { min_match_len: 256, smallest_len: 100_000, ..Params::default() }.clamped();
    assert_eq!(p.smallest_len, 256);
}

#[test]
fn tiny_lengths_clamp_to_the_floor() {
    let p = Params { min_match_len: 4, smallest_len: 1, ..Params::default() }.clamped();
    assert_eq!(p.min_match_len, MIN_MATCH_FLOOR);
    assert_eq!(p.smallest_len, MIN_MATCH_FLOOR);
}

#[test]
fn block_size_clamps_both_ways() {
    let small = Params { block_size: 1, ..Params::default() }.clamped();
    assert_eq!(small.block_size, MIN_BLOCK_SIZE);
    let big = Params { block_size: usize::MAX, ..Params::default() }.clamped();
    assert_eq!(big.block_size, MAX_BLOCK_SIZE);
}

#[test]
fn amplifier_zero_becomes_one() {
    let p = Params { amplifier: 0, ..Params::default() }.clamped();
    assert_eq!(p.amplifier, 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Geometry
// ─────────────────────────────────────────────────────────────────────────────

fn geometry(block_size: usize, smallest: usize, amplifier: usize, hash_bits: u32) -> Geometry {
    let p = Params {
        block_size,
        min_match_len: smallest.max(512),
        smallest_len: smallest,
        amplifier,
        hash_bits,
        ..Params::default()
    }
    .clamped();
    Geometry::derive(&p)
}

#[test]
fn hash_window_is_half_the_smallest_match() {
    assert_eq!(geometry(MB, 32, 1, 0).l, 16);
    assert_eq!(geometry(MB, 512, 1, 0).l, 256);
    assert_eq!(geometry(MB, 8192, 1, 0).l, 4096);
    // Non-power-of-two lengths round the window up.
    assert_eq!(geometry(MB, 600, 1, 0).l, 512);
}

#[test]
fn stride_squared_fits_the_window() {
    for &smallest in &[32usize, 64, 512, 2048, 8192] {
        let g = geometry(4 * MB, smallest, 1, 0);
        assert!(g.l.is_power_of_two());
        assert!(g.k.is_power_of_two());
        assert!(g.k * g.k <= g.l, "k^2 must not exceed l");
        assert!(2 * g.k * 2 * g.k > g.l, "k must be the largest such power of two");
    }
}

#[test]
fn probe_count_scales_with_amplifier_up_to_the_window() {
    assert_eq!(geometry(MB, 512, 1, 0).probes, 16);
    assert_eq!(geometry(MB, 512, 4, 0).probes, 64);
    assert_eq!(geometry(MB, 512, 1000, 0).probes, 256); // capped at l
}

#[test]
fn auto_hash_size_stays_within_a_quarter_of_the_window() {
    for &bs in &[64 * KB, MB, 64 * MB] {
        for &smallest in &[32usize, 512, 8192] {
            let g = geometry(bs, smallest, 1, 0);
            assert!(g.hash_size.is_power_of_two());
            assert!(
                g.hash_size * 4 <= bs / 4 || g.hash_size == 1 << 10,
                "table bytes {} exceed a quarter of window {bs}",
                g.hash_size * 4
            );
        }
    }
}

#[test]
fn hash_bits_overrides_auto_sizing() {
    assert_eq!(geometry(64 * MB, 512, 1, 12).hash_size, 1 << 12);
    assert_eq!(geometry(64 * MB, 512, 1, 20).hash_size, 1 << 20);
}

#[test]
fn slot_masks_complement_each_other() {
    let g = geometry(MB, 512, 1, 0); // k = 16
    assert_eq!(g.chk_mask, 15);
    assert_eq!(g.pos_mask, !15u32);
    assert_eq!(g.chk_mask & g.pos_mask, 0);
    assert_eq!(g.chk_mask | g.pos_mask, u32::MAX);
}
