//! Compression driver: the refill/walk/flush loop.
//!
//! The driver owns the window, the hash index, the rolling hash, and three
//! position counters:
//!
//! - `last_i` — the next anchor position to process;
//! - `last_match` — the end of the last emitted match, which doubles as the
//!   consumed-input watermark (no emitted literal run overlaps a match);
//! - the window's `base` — bytes committed before the current refill.
//!
//! Per refill it walks anchors `last_i .. data_end - 2L`, probing the index
//! at the first `probes` positions of each L-sized sub-block, inserting at
//! every stride-aligned position, and rolling the hash across all of them.
//! Confirmed matches become records; after the walk one block frame is
//! flushed.  When a refill tops the window off exactly, the unwalked tail
//! is folded into the flush (still indexed at stride positions, so the
//! policy holds even there), and the position counters reset to zero — the
//! logical ring origin slides while the index keeps its old entries.
//!
//! A read of zero bytes ends the stream: whatever sits past the watermark
//! becomes the terminator's literal run.  This includes the corner where
//! the buffer was left exactly full — the wrap has already flushed
//! everything, and the terminator carries an empty literal.

use std::io::{Read, Write};

use crate::codec::error::LrepError;
use crate::codec::frame::{BlockRecords, FrameWriter};
use crate::codec::hash::RollingHash;
use crate::codec::index::MatchIndex;
use crate::codec::params::{Geometry, Params};
use crate::codec::verify::confirm;
use crate::codec::window::Window;
use crate::codec::CodecStats;
use crate::config::MAX_READ;

/// Compress `src` into `dst` with the given parameters.
///
/// Reads the source to end of stream, writing the header, the block frames,
/// and the terminator.  All buffers live exactly as long as this call.
/// I/O errors from either stream are propagated unchanged.
pub fn compress<R, W>(params: &Params, src: &mut R, dst: &mut W) -> Result<CodecStats, LrepError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let p = params.clamped();
    let g = Geometry::derive(&p);
    let bs = p.block_size;

    let mut win = Window::new(bs)?;
    let mut index = MatchIndex::new(g.hash_size, g.k)?;
    let mut hash = RollingHash::new(g.l);
    let mut recs = BlockRecords::default();
    let mut fw = FrameWriter::new();
    let mut stats = CodecStats::default();

    stats.bytes_out += fw.write_header(dst, bs as u32)? as u64;

    let mut primed = false;
    let mut last_i = 0usize;
    let mut last_match = 0usize;
    let mut first = true;

    loop {
        let want = if first { bs.min(MAX_READ) } else { (bs / 8).min(MAX_READ) };
        first = false;
        let n = win.refill(src, want)?;
        if n == 0 {
            break;
        }
        stats.bytes_in += n as u64;

        let data_end = win.data_end();

        if !primed {
            if data_end < g.l {
                // Not enough bytes yet to fill the hash window; keep reading.
                win.commit();
                continue;
            }
            hash.prime(&win.buf()[..g.l]);
            last_i = g.l;
            primed = true;
        }

        // ── Main walk ────────────────────────────────────────────────────
        let limit = data_end.saturating_sub(2 * g.l);
        if limit > last_i {
            let buf = win.buf();
            let mut i = last_i;
            while i < limit {
                let h = hash.value();
                if i >= last_match && (i & (g.l - 1)) < g.probes {
                    let slot = index.lookup(h);
                    if index.plausible(slot, h) {
                        let cand = index.position(slot) as usize;
                        if let Some(m) = confirm(
                            buf,
                            bs,
                            data_end,
                            last_match,
                            i,
                            cand,
                            p.min_match_len,
                            p.barrier,
                            p.smallest_len,
                        ) {
                            recs.push(last_match, m.start, m.len(), m.offset);
                            last_match = m.end;
                            stats.matches += 1;
                        }
                    }
                }
                if i & (g.k - 1) == 0 {
                    index.store(h, i as u32);
                }
                let out_at = if i >= g.l { i - g.l } else { bs + i - g.l };
                hash.shift(buf[out_at], buf[i]);
                i += 1;
            }
            last_i = limit;
        }

        // ── Flush, with special handling for an exactly full window ──────
        let wrapping = data_end == bs;
        if wrapping {
            // Roll the hash across the unwalked tail so the anchor lands on
            // ring position 0; stride-aligned positions are still indexed.
            let buf = win.buf();
            for i in last_i..bs {
                if i & (g.k - 1) == 0 {
                    index.store(hash.value(), i as u32);
                }
                hash.shift(buf[i - g.l], buf[i]);
            }
            last_i = bs;
        }

        let lit_end = if wrapping { bs } else { last_i };
        if !recs.is_empty() || lit_end > last_match {
            stats.bytes_out +=
                fw.write_block(dst, win.buf(), &mut recs, last_match, lit_end)? as u64;
        }
        last_match = last_match.max(lit_end);

        if win.commit() {
            // Logical ring wrap: positions restart at zero.  The hash index
            // is left as-is; the verifier's bounds sort live from stale.
            last_i = 0;
            last_match = 0;
        }
    }

    stats.bytes_out +=
        fw.write_terminator(dst, win.buf(), last_match, win.base())? as u64;
    dst.flush()?;
    Ok(stats)
}
