//! Decompression driver: frame reader plus ring reconstruction.
//!
//! Output is rebuilt inside a logical ring of `block_size` bytes backed by
//! two physical buffers, `data0` and `data1`.  Ideally `data0` covers the
//! whole ring and `data1` is empty; when a single allocation of that size
//! fails, `data0` shrinks in 1 MiB steps (with `data1` covering the rest)
//! until both fit.  Logical position `p` maps to `data0[p]` when
//! `p < data0.len()`, else to `data1[p - data0.len()]`.
//!
//! Bytes are flushed to the sink a completed segment at a time, so the sink
//! sees output in exact stream order while the ring keeps the most recent
//! `block_size` bytes addressable for back-references.
//!
//! Match copies walk the ring in maximal runs bounded by the source and
//! destination segment ends.  When source and destination land in the same
//! physical buffer the run is copied byte by byte, front to back — with
//! `offset < len` the regions overlap and the forward byte copy is what
//! turns a short seed into a repeated pattern.  A bulk copy there would
//! read bytes the copy itself has not produced yet.

use std::io::{Read, Write};

use crate::codec::error::{try_alloc_bytes, LrepError};
use crate::codec::frame::{read_u32, BlockView};
use crate::codec::params::MAX_BLOCK_SIZE;
use crate::codec::CodecStats;
use crate::config::MB;

// ─────────────────────────────────────────────────────────────────────────────
// RingOut — dual-buffer ring writer
// ─────────────────────────────────────────────────────────────────────────────

/// The reconstruction ring: two back-to-back buffers, a write cursor, and
/// the start of the not-yet-flushed region.
#[derive(Debug)]
pub struct RingOut {
    data0: Vec<u8>,
    data1: Vec<u8>,
    /// data0's share of the ring (`data0.len()`).
    d0: usize,
    block_size: usize,
    /// Ring position of the next byte to write.
    pos: usize,
    /// Ring position of the oldest unflushed byte; always in the same
    /// segment as `pos`.
    mark: usize,
    /// Total bytes pushed through the ring.
    total: u64,
}

impl RingOut {
    /// Allocate the ring, preferring one `block_size` buffer and falling
    /// back to an ever smaller `data0` in 1 MiB steps.
    pub fn new(block_size: usize) -> Result<RingOut, LrepError> {
        let mut d0 = block_size;
        loop {
            match Self::try_layout(block_size, d0) {
                Ok(ring) => return Ok(ring),
                Err(LrepError::OutOfMemory) if d0 > MB => d0 -= MB,
                Err(e) => return Err(e),
            }
        }
    }

    /// Allocate with an explicit `data0` share.  Used by memory-constrained
    /// callers and by tests pinning matches across the buffer seam.
    pub fn with_data0(block_size: usize, data0_size: usize) -> Result<RingOut, LrepError> {
        Self::try_layout(block_size, data0_size.clamp(1, block_size))
    }

    fn try_layout(block_size: usize, d0: usize) -> Result<RingOut, LrepError> {
        Ok(RingOut {
            data0: try_alloc_bytes(d0)?,
            data1: try_alloc_bytes(block_size - d0)?,
            d0,
            block_size,
            pos: 0,
            mark: 0,
            total: 0,
        })
    }

    #[inline(always)]
    fn seg_end(&self, p: usize) -> usize {
        if p < self.d0 {
            self.d0
        } else {
            self.block_size
        }
    }

    /// Advance the cursor past `n` freshly written bytes, flushing the
    /// segment to the sink when the cursor completes it.
    fn advance<W: Write + ?Sized>(&mut self, sink: &mut W, n: usize) -> Result<(), LrepError> {
        let end = self.seg_end(self.pos);
        self.pos += n;
        self.total += n as u64;
        debug_assert!(self.pos <= end);
        if self.pos == end {
            self.flush_run(sink)?;
            self.pos = if end == self.block_size { 0 } else { end };
            self.mark = self.pos;
        }
        Ok(())
    }

    /// Write the unflushed run `[mark, pos)` — always within one segment —
    /// to the sink.
    fn flush_run<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<(), LrepError> {
        if self.pos > self.mark {
            let run = if self.mark < self.d0 {
                &self.data0[self.mark..self.pos]
            } else {
                &self.data1[self.mark - self.d0..self.pos - self.d0]
            };
            sink.write_all(run)?;
            self.mark = self.pos;
        }
        Ok(())
    }

    /// Append literal bytes at the cursor.
    pub fn write_slice<W: Write + ?Sized>(
        &mut self,
        sink: &mut W,
        mut bytes: &[u8],
    ) -> Result<(), LrepError> {
        while !bytes.is_empty() {
            let room = self.seg_end(self.pos) - self.pos;
            let n = bytes.len().min(room);
            if self.pos < self.d0 {
                self.data0[self.pos..self.pos + n].copy_from_slice(&bytes[..n]);
            } else {
                let at = self.pos - self.d0;
                self.data1[at..at + n].copy_from_slice(&bytes[..n]);
            }
            bytes = &bytes[n..];
            self.advance(sink, n)?;
        }
        Ok(())
    }

    /// Replay `len` bytes from `offset` positions back in the ring.
    pub fn copy_match<W: Write + ?Sized>(
        &mut self,
        sink: &mut W,
        offset: usize,
        mut len: usize,
    ) -> Result<(), LrepError> {
        debug_assert!(offset >= 1 && offset < self.block_size);
        while len > 0 {
            let src = (self.pos + self.block_size - offset) % self.block_size;
            let n = len
                .min(self.seg_end(self.pos) - self.pos)
                .min(self.seg_end(src) - src);

            let dst_in_d0 = self.pos < self.d0;
            let src_in_d0 = src < self.d0;
            if dst_in_d0 == src_in_d0 {
                // Same physical buffer: sequential forward copy.  Overlap is
                // the run-length case (`offset < len`) and must replicate.
                let (buf, d, s) = if dst_in_d0 {
                    (&mut self.data0, self.pos, src)
                } else {
                    (&mut self.data1, self.pos - self.d0, src - self.d0)
                };
                for t in 0..n {
                    buf[d + t] = buf[s + t];
                }
            } else if dst_in_d0 {
                let s = src - self.d0;
                self.data0[self.pos..self.pos + n].copy_from_slice(&self.data1[s..s + n]);
            } else {
                let d = self.pos - self.d0;
                self.data1[d..d + n].copy_from_slice(&self.data0[src..src + n]);
            }

            len -= n;
            self.advance(sink, n)?;
        }
        Ok(())
    }

    /// Flush whatever the last block left unwritten.
    pub fn finish<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<(), LrepError> {
        self.flush_run(sink)
    }

    /// Total bytes pushed through the ring so far.
    pub fn total(&self) -> u64 {
        self.total
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Driver
// ─────────────────────────────────────────────────────────────────────────────

/// Decompress `src` into `dst`, reconstructing the exact original stream.
pub fn decompress<R, W>(src: &mut R, dst: &mut W) -> Result<CodecStats, LrepError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    run(src, dst, None)
}

/// [`decompress`] with an explicit `data0_size` for the reconstruction
/// ring, instead of preferring one full-window buffer.  Behaviour is
/// byte-identical to the single-buffer layout.
pub fn decompress_split<R, W>(
    src: &mut R,
    dst: &mut W,
    data0_size: usize,
) -> Result<CodecStats, LrepError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    run(src, dst, Some(data0_size))
}

fn run<R, W>(src: &mut R, dst: &mut W, data0_size: Option<usize>) -> Result<CodecStats, LrepError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let block_size = read_u32(src)? as usize;
    if block_size == 0 || block_size > MAX_BLOCK_SIZE {
        return Err(LrepError::CorruptFrame("unusable window size in header"));
    }

    let mut ring = match data0_size {
        Some(d0) => RingOut::with_data0(block_size, d0)?,
        None => RingOut::new(block_size)?,
    };
    let mut scratch: Vec<u8> = Vec::new();
    let mut stats = CodecStats::default();
    stats.bytes_in = 4;

    loop {
        let compr_size = read_u32(src)? as usize;
        if compr_size == 0 {
            break;
        }
        if compr_size > scratch.len() {
            scratch = try_alloc_bytes(compr_size)?;
        }
        src.read_exact(&mut scratch[..compr_size])?;
        stats.bytes_in += 4 + compr_size as u64;

        let view = BlockView::parse(&scratch[..compr_size], block_size)?;
        let mut runs = view.literal_runs();
        for j in 0..=view.num() {
            let lit = runs.next().unwrap();
            ring.write_slice(dst, lit)?;
            if j < view.num() {
                ring.copy_match(dst, view.offset(j), view.len(j))?;
                stats.matches += 1;
            }
        }
    }
    stats.bytes_in += 4; // the end-of-stream sentinel

    ring.finish(dst)?;
    dst.flush()?;
    stats.bytes_out = ring.total();
    Ok(stats)
}
