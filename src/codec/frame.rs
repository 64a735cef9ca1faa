//! Stream framing: little-endian primitives, the block writer, and the
//! block parser.
//!
//! The stream is a concatenation of 32-bit little-endian fields and raw
//! literal bytes:
//!
//! ```text
//! FILE       := HEADER BLOCK* TERMINATOR
//! HEADER     := u32 block_size
//! BLOCK      := u32 compr_size          bytes in the rest of this block
//!               u32 num                 number of match records
//!               u32[num]   lens         match lengths
//!               u32[num]   offsets      match offsets, 1..block_size-1
//!               u32[num+1] datalens     literal run lengths
//!               bytes[sum(datalens)]    literal bytes
//! TERMINATOR := BLOCK with num == 0, then u32 0
//! ```
//!
//! `compr_size` counts everything after the `compr_size` field itself:
//! `4 + 4*num + 4*num + 4*(num+1) + sum(datalens)`.  There is no magic
//! number and no checksum; a compressed stream is only as robust as its
//! transport.

use std::io::{Read, Write};

use crate::codec::error::LrepError;

// ─────────────────────────────────────────────────────────────────────────────
// Little-endian primitives
// ─────────────────────────────────────────────────────────────────────────────

/// Read one little-endian `u32` from the stream.
#[inline]
pub fn read_u32<R: Read + ?Sized>(src: &mut R) -> Result<u32, LrepError> {
    let mut b = [0u8; 4];
    src.read_exact(&mut b)?;
    Ok(u32::from_le_bytes(b))
}

/// Append one little-endian `u32` to an in-memory buffer.
#[inline]
pub fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// Decode the little-endian `u32` at byte offset `pos`.  The caller has
/// already validated that `pos + 4 <= bytes.len()`.
#[inline]
pub fn get_u32(bytes: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes(bytes[pos..pos + 4].try_into().unwrap())
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoder side: FrameWriter
// ─────────────────────────────────────────────────────────────────────────────

/// Per-block record staging: parallel arrays of match records plus the
/// window offsets of their preceding literal runs.
///
/// Allocated once per operation and reused across blocks, so block flushes
/// cause no steady-state heap traffic.
#[derive(Debug, Default)]
pub struct BlockRecords {
    lens: Vec<u32>,
    offsets: Vec<u32>,
    datalens: Vec<u32>,
    data_offsets: Vec<usize>,
}

impl BlockRecords {
    pub fn is_empty(&self) -> bool {
        self.lens.is_empty()
    }

    pub fn num(&self) -> usize {
        self.lens.len()
    }

    /// Record one match and the literal run `[lit_start, start)` in front
    /// of it.
    pub fn push(&mut self, lit_start: usize, start: usize, len: usize, offset: usize) {
        self.datalens.push((start - lit_start) as u32);
        self.data_offsets.push(lit_start);
        self.lens.push(len as u32);
        self.offsets.push(offset as u32);
    }

    fn clear(&mut self) {
        self.lens.clear();
        self.offsets.clear();
        self.datalens.clear();
        self.data_offsets.clear();
    }
}

/// Serializes block frames, reusing one scratch buffer for the fixed-size
/// part of each block.
#[derive(Debug, Default)]
pub struct FrameWriter {
    wbuf: Vec<u8>,
}

impl FrameWriter {
    pub fn new() -> FrameWriter {
        FrameWriter::default()
    }

    /// Write the stream header.  Returns the bytes written (4).
    pub fn write_header<W: Write + ?Sized>(
        &mut self,
        dst: &mut W,
        block_size: u32,
    ) -> Result<usize, LrepError> {
        dst.write_all(&block_size.to_le_bytes())?;
        Ok(4)
    }

    /// Flush one block: the staged records plus the trailing literal run
    /// `[lit_start, lit_end)` (which may be empty).  Literal bytes are
    /// gathered straight from the window.  Returns the bytes written and
    /// clears the staging arrays.
    pub fn write_block<W: Write + ?Sized>(
        &mut self,
        dst: &mut W,
        window: &[u8],
        recs: &mut BlockRecords,
        lit_start: usize,
        lit_end: usize,
    ) -> Result<usize, LrepError> {
        let trailing = lit_end.saturating_sub(lit_start);
        let num = recs.num();
        let datalen_total: usize =
            recs.datalens.iter().map(|&d| d as usize).sum::<usize>() + trailing;
        let compr_size = 4 + 4 * num + 4 * num + 4 * (num + 1) + datalen_total;

        self.wbuf.clear();
        put_u32(&mut self.wbuf, compr_size as u32);
        put_u32(&mut self.wbuf, num as u32);
        for &len in &recs.lens {
            put_u32(&mut self.wbuf, len);
        }
        for &off in &recs.offsets {
            put_u32(&mut self.wbuf, off);
        }
        for &dl in &recs.datalens {
            put_u32(&mut self.wbuf, dl);
        }
        put_u32(&mut self.wbuf, trailing as u32);
        dst.write_all(&self.wbuf)?;

        for (j, &dl) in recs.datalens.iter().enumerate() {
            let at = recs.data_offsets[j];
            dst.write_all(&window[at..at + dl as usize])?;
        }
        if trailing > 0 {
            dst.write_all(&window[lit_start..lit_end])?;
        }

        recs.clear();
        Ok(4 + compr_size)
    }

    /// Write the terminator: a record-free block holding the final literal
    /// run, then the end-of-stream sentinel.  Returns the bytes written.
    pub fn write_terminator<W: Write + ?Sized>(
        &mut self,
        dst: &mut W,
        window: &[u8],
        lit_start: usize,
        lit_end: usize,
    ) -> Result<usize, LrepError> {
        let mut recs = BlockRecords::default();
        let n = self.write_block(dst, window, &mut recs, lit_start, lit_end)?;
        dst.write_all(&0u32.to_le_bytes())?;
        Ok(n + 4)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoder side: BlockView
// ─────────────────────────────────────────────────────────────────────────────

/// Parsed view over one block's payload (everything after `compr_size`).
///
/// Construction validates the structure — the record table and the literal
/// lengths must exactly account for the payload, and offsets must fit the
/// window — because indexing past a slice end is not an option.  Payload
/// corruption that keeps the structure consistent is *not* detectable; the
/// format carries no checksum.
#[derive(Debug)]
pub struct BlockView<'a> {
    payload: &'a [u8],
    num: usize,
    /// Byte offset of the literal region within `payload`.
    literals_at: usize,
}

impl<'a> BlockView<'a> {
    /// Parse and validate `payload` against window size `block_size`.
    pub fn parse(payload: &'a [u8], block_size: usize) -> Result<BlockView<'a>, LrepError> {
        if payload.len() < 8 {
            return Err(LrepError::CorruptFrame("block shorter than its fixed fields"));
        }
        let num = get_u32(payload, 0) as usize;
        let table = 4usize
            .checked_add(num.checked_mul(12).ok_or(LrepError::CorruptFrame("record count overflow"))?)
            .and_then(|t| t.checked_add(4))
            .ok_or(LrepError::CorruptFrame("record count overflow"))?;
        if table > payload.len() {
            return Err(LrepError::CorruptFrame("record table overruns block"));
        }

        let view = BlockView { payload, num, literals_at: table };

        let mut lit_total = 0usize;
        for j in 0..=num {
            lit_total += view.datalen(j);
        }
        if table + lit_total != payload.len() {
            return Err(LrepError::CorruptFrame("literal lengths disagree with block size"));
        }
        for j in 0..num {
            let off = view.offset(j);
            if off == 0 || off >= block_size {
                return Err(LrepError::CorruptFrame("match offset outside window"));
            }
        }
        Ok(view)
    }

    #[inline]
    pub fn num(&self) -> usize {
        self.num
    }

    /// Length of match record `j`.
    #[inline]
    pub fn len(&self, j: usize) -> usize {
        get_u32(self.payload, 4 + 4 * j) as usize
    }

    /// Offset of match record `j`.
    #[inline]
    pub fn offset(&self, j: usize) -> usize {
        get_u32(self.payload, 4 + 4 * self.num + 4 * j) as usize
    }

    /// Length of literal run `j` (`j` ranges over `0..=num`).
    #[inline]
    pub fn datalen(&self, j: usize) -> usize {
        get_u32(self.payload, 4 + 8 * self.num + 4 * j) as usize
    }

    /// The literal bytes of run `j`, located by summing the runs before it.
    /// O(j); the drivers use [`BlockView::literal_runs`] instead.
    pub fn literal(&self, j: usize) -> &'a [u8] {
        let mut at = self.literals_at;
        for i in 0..j {
            at += self.datalen(i);
        }
        &self.payload[at..at + self.datalen(j)]
    }

    /// All `num + 1` literal runs in stream order, sharing one cursor.
    pub fn literal_runs(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        let payload = self.payload;
        let mut at = self.literals_at;
        (0..=self.num).map(move |j| {
            let len = self.datalen(j);
            let run = &payload[at..at + len];
            at += len;
            run
        })
    }
}
