//! Sliding window buffer and its refill bookkeeping.
//!
//! The window is one flat allocation of `block_size` bytes used as a
//! logical ring at refill granularity: reads land at `base`, the encoder
//! walks the freshly read region, and `commit` advances `base` past it.
//! When `base` reaches `block_size` the origin slides — `base` resets to
//! zero and subsequent refills overwrite the oldest generation in place.
//! Nothing is ever copied to "make room".
//!
//! While `base + size < block_size`, the byte range `[base + size,
//! block_size)` still holds the previous generation; the verifier's bounds
//! keep references into it usable until the bytes are actually overwritten.

use std::io::Read;

use crate::codec::error::{try_alloc_bytes, LrepError};

/// The window buffer plus the refill cursor.
#[derive(Debug)]
pub struct Window {
    buf: Vec<u8>,
    block_size: usize,
    /// Bytes committed to the window before the current refill.
    base: usize,
    /// Bytes delivered by the current refill (not yet committed).
    size: usize,
}

impl Window {
    /// Allocate a zero-filled window of `block_size` bytes.
    pub fn new(block_size: usize) -> Result<Window, LrepError> {
        Ok(Window {
            buf: try_alloc_bytes(block_size)?,
            block_size,
            base: 0,
            size: 0,
        })
    }

    /// Full window contents.  Only `[0, data_end())` is current-generation
    /// data; anything above is the previous pass (or zero fill before the
    /// first wrap).
    #[inline(always)]
    pub fn buf(&self) -> &[u8] {
        &self.buf
    }

    #[inline(always)]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline(always)]
    pub fn base(&self) -> usize {
        self.base
    }

    /// End of current-generation data: `base + size`.
    #[inline(always)]
    pub fn data_end(&self) -> usize {
        self.base + self.size
    }

    /// Issue one read of at most `want` bytes at the refill cursor.
    ///
    /// Returns the byte count delivered; 0 means end of stream.  A short
    /// read is not an error — it just makes this refill smaller.
    pub fn refill<R: Read + ?Sized>(&mut self, src: &mut R, want: usize) -> Result<usize, LrepError> {
        debug_assert_eq!(self.size, 0, "previous refill must be committed first");
        let want = want.min(self.block_size - self.base);
        let n = src.read(&mut self.buf[self.base..self.base + want])?;
        self.size = n;
        Ok(n)
    }

    /// Commit the current refill: `base += size`.  Returns `true` when the
    /// window wrapped (the logical origin slid and `base` reset to zero).
    pub fn commit(&mut self) -> bool {
        self.base += self.size;
        self.size = 0;
        if self.base == self.block_size {
            self.base = 0;
            true
        } else {
            false
        }
    }
}
