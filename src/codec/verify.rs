//! Byte-level confirmation of index candidates.
//!
//! The index only says "these two positions hashed alike once".  Everything
//! else — staleness, ring wraparound, actual byte equality, the length
//! threshold — is decided here.  The first candidate that survives wins;
//! there is no search for a longer match from a later probe.
//!
//! Positions are absolute window offsets in `[0, block_size)`.  A candidate
//! below the anchor refers to the current generation; a candidate at or
//! above `data_end` refers to the previous generation, still live because
//! refills have not yet overwritten it.  Candidates in `[anchor, data_end)`
//! were stored before the last wrap for bytes that no longer exist, and are
//! rejected outright.

/// One confirmed match: the window span `[start, end)` repeats the bytes
/// `offset` positions back in the logical ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    pub offset: usize,
}

impl MatchSpan {
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Forward ring distance from `cand` to `anchor`: how far back the
/// candidate's bytes sit, as the decoder will see it.
#[inline(always)]
pub fn ring_offset(block_size: usize, anchor: usize, cand: usize) -> usize {
    if cand <= anchor {
        anchor - cand
    } else {
        anchor + block_size - cand
    }
}

/// Verify the candidate at `cand` against the anchor at `anchor`.
///
/// `data_end` is the end of current-generation data (`base + size`);
/// `last_match` is the end of the last emitted match, which no extension may
/// cross.  Returns the confirmed span, or `None` when the candidate is
/// stale, too short for its distance, or not actually equal.
pub fn confirm(
    buf: &[u8],
    block_size: usize,
    data_end: usize,
    last_match: usize,
    anchor: usize,
    cand: usize,
    min_match_len: usize,
    barrier: usize,
    smallest_len: usize,
) -> Option<MatchSpan> {
    // Stale slot: stored ahead of the anchor in logical time, and the bytes
    // it described have been overwritten by the current generation.
    if cand >= anchor && cand < data_end {
        return None;
    }

    let offset = ring_offset(block_size, anchor, cand);
    if offset == 0 {
        return None;
    }

    // Far matches clear a lower bar: anything the downstream compressor's
    // own window would catch (offset < barrier) must pull its weight.
    let threshold = if offset < barrier { min_match_len } else { smallest_len };

    let old_gen = cand > anchor;

    // ── Backward extension ───────────────────────────────────────────────
    // The destination may not cross the previous match, nor (same
    // generation) the candidate itself; the source may not leave its own
    // live region: position 0 for current-generation sources, `data_end`
    // for previous-generation ones.
    let dest_low = if old_gen { last_match } else { last_match.max(cand) };
    let src_low = if old_gen { data_end } else { 0 };

    let mut p = anchor;
    let mut s = cand;
    while p > dest_low && s > src_low && buf[p - 1] == buf[s - 1] {
        p -= 1;
        s -= 1;
    }
    let start = p;

    // ── Forward extension ────────────────────────────────────────────────
    // The destination stops at end-of-data; a previous-generation source
    // wraps at `block_size` and continues through the current generation
    // (where it trails the destination by `offset`, always live).
    let mut p = anchor;
    let mut s = cand;
    while p < data_end {
        if s == block_size {
            s = 0;
        }
        if buf[p] != buf[s] {
            break;
        }
        p += 1;
        s += 1;
    }
    let end = p;

    if end - start >= threshold {
        Some(MatchSpan { start, end, offset })
    } else {
        None
    }
}
