//! Direct-mapped hash index with packed 32-bit slots.
//!
//! There are no chains: each slot holds at most one candidate, and a later
//! insert simply overwrites.  A slot packs two things:
//!
//! - high bits — the recorded window position, always a multiple of the
//!   stride `k` (so its low `log2(k)` bits are free);
//! - low `log2(k)` bits — a partial checksum taken from hash bits
//!   `28..28+log2(k)`, used to reject most stale or colliding slots before
//!   the byte-level verifier runs.
//!
//! Zero is reserved for "empty".  Recorded positions start at the hash
//! window length (a power of two above the checksum bits), so a live slot
//! can never collide with the empty encoding.
//!
//! The table is zeroed once at allocation and never again: entries from
//! before a window wrap stay in place, and the verifier's position checks
//! plus byte comparison decide whether they still name live bytes.

use crate::codec::error::{try_alloc_slots, LrepError};
use crate::codec::hash::CHKSUM_SHIFT;

/// The match-candidate index: `hash -> packed (position, chksum)` slots.
#[derive(Debug)]
pub struct MatchIndex {
    slots: Vec<u32>,
    hash_mask: usize,
    chk_mask: u32,
    pos_mask: u32,
}

impl MatchIndex {
    /// Allocate a zero-initialized index of `hash_size` slots (a power of
    /// two) for stride `k`.
    pub fn new(hash_size: usize, k: usize) -> Result<MatchIndex, LrepError> {
        debug_assert!(hash_size.is_power_of_two() && k.is_power_of_two());
        let chk_mask = (k - 1) as u32;
        Ok(MatchIndex {
            slots: try_alloc_slots(hash_size)?,
            hash_mask: hash_size - 1,
            chk_mask,
            pos_mask: !chk_mask,
        })
    }

    /// Partial checksum tag for hash value `h`.
    #[inline(always)]
    pub fn chksum(&self, h: u32) -> u32 {
        (h >> CHKSUM_SHIFT) & self.chk_mask
    }

    /// Raw packed slot for hash value `h` (0 = empty).
    #[inline(always)]
    pub fn lookup(&self, h: u32) -> u32 {
        self.slots[(h as usize) & self.hash_mask]
    }

    /// Record `pos` under hash `h`, overwriting whatever was there.
    /// The caller aligns `pos` to a `k` boundary; the mask below only
    /// strips bits that are already zero.
    #[inline(always)]
    pub fn store(&mut self, h: u32, pos: u32) {
        debug_assert_eq!(pos & self.chk_mask, 0, "stored position must be stride-aligned");
        self.slots[(h as usize) & self.hash_mask] = (pos & self.pos_mask) | self.chksum(h);
    }

    /// Recorded position of a non-empty packed slot.
    #[inline(always)]
    pub fn position(&self, slot: u32) -> u32 {
        slot & self.pos_mask
    }

    /// Whether `slot` is worth verifying against hash `h`: non-empty and
    /// carrying the same checksum tag.
    #[inline(always)]
    pub fn plausible(&self, slot: u32, h: u32) -> bool {
        slot != 0 && (slot & self.chk_mask) == self.chksum(h)
    }
}
