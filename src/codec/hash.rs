//! Multiplicative polynomial rolling hash over a fixed window of `L` bytes.
//!
//! The state at anchor `i` equals the polynomial hash of the preceding `L`
//! bytes: `h = sum(buf[i-L+j] * PRIME^(L-1-j))` for `j = 0..L`, evaluated in
//! wrapping 32-bit arithmetic.  Advancing the anchor by one byte is O(1):
//!
//! ```text
//! h' = h * PRIME + incoming - outgoing * PRIME^L      (mod 2^32)
//! ```
//!
//! The wrap at 2^32 is part of the definition, not an implementation
//! accident — index slots and their checksum tags are computed from the
//! wrapped value, and both ends of the stream must agree on it.
//!
//! Priming folds the first `L` bytes in with `shift(0, byte)`, which by the
//! update rule above lands on exactly the direct polynomial value (the
//! outgoing term contributes nothing while the window fills with zeros).

/// Hash multiplier.  A true polynomial hash spreads slot indices uniformly
/// and leaves the high bits usable as a cheap identity tag.
pub const PRIME: u32 = 153_191;

/// Bit position of the checksum tag window within the hash value.  The tag
/// is `(h >> CHKSUM_SHIFT) & (k - 1)`.
pub const CHKSUM_SHIFT: u32 = 28;

/// Rolling hash state plus the precomputed `PRIME^L` removal factor.
#[derive(Debug, Clone)]
pub struct RollingHash {
    h: u32,
    /// `PRIME^L mod 2^32`; multiplies the byte leaving the window.
    power_l: u32,
}

impl RollingHash {
    /// Create a hash for a window of `l` bytes (`l` is a power of two).
    pub fn new(l: usize) -> RollingHash {
        RollingHash {
            h: 0,
            power_l: PRIME.wrapping_pow(l as u32),
        }
    }

    /// Current hash value.
    #[inline(always)]
    pub fn value(&self) -> u32 {
        self.h
    }

    /// Advance the window by one byte: `outgoing` leaves, `incoming` enters.
    #[inline(always)]
    pub fn shift(&mut self, outgoing: u8, incoming: u8) {
        self.h = self
            .h
            .wrapping_mul(PRIME)
            .wrapping_add(incoming as u32)
            .wrapping_sub((outgoing as u32).wrapping_mul(self.power_l));
    }

    /// Reset the state and fold in `window` (the first `l` bytes of the
    /// stream).  Afterwards the anchor sits just past `window`.
    pub fn prime(&mut self, window: &[u8]) {
        self.h = 0;
        for &b in window {
            self.shift(0, b);
        }
    }
}

/// Direct polynomial evaluation of a whole window.  O(len); the rolling
/// update must land on the same value, which the hash-law tests pin down.
pub fn polynomial(window: &[u8]) -> u32 {
    let mut h = 0u32;
    for &b in window {
        h = h.wrapping_mul(PRIME).wrapping_add(b as u32);
    }
    h
}
