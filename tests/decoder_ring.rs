//! Decoder-side suite: the dual-buffer ring (seam crossings, overlapped
//! run replication), handcrafted streams, and structural corruption.

mod common;

use std::io::Cursor;

use common::assert_roundtrip;
use lrep::codec::error::LrepError;
use lrep::corpus::{pseudo_random, repeating};
use lrep::{compress, decompress, decompress_split, Params};

const KB: usize = 1 << 10;

fn params(block_size: usize, min_match: usize) -> Params {
    Params {
        block_size,
        min_match_len: min_match,
        smallest_len: min_match,
        ..Params::default()
    }
}

fn le_stream(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|v| v.to_le_bytes()).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Split-buffer equivalence
// ─────────────────────────────────────────────────────────────────────────────

/// Decode `packed` with the given data0 share and demand byte equality with
/// the reference single-buffer decode.
fn assert_split_equals(packed: &[u8], expected: &[u8], data0_size: usize) {
    let mut out = Vec::new();
    decompress_split(&mut Cursor::new(packed), &mut out, data0_size)
        .unwrap_or_else(|e| panic!("split decode (data0={data0_size}) failed: {e}"));
    assert!(out == expected, "split decode (data0={data0_size}) diverged");
}

#[test]
fn matches_spanning_the_seam_reconstruct_identically() {
    // Copies land on [96K, 160K) of the stream, so with data0 = 64K both
    // the copy source and destination cross the data0/data1 seam.
    let bs = 128 * KB;
    let mut data = pseudo_random(96 * KB, 60);
    let head = data[..64 * KB].to_vec();
    data.extend_from_slice(&head);

    let (packed, stats) = assert_roundtrip(&params(bs, 32), &data);
    assert!(stats.matches > 0);
    assert_split_equals(&packed, &data, bs / 2);
}

#[test]
fn overlapped_runs_replicate_across_the_seam() {
    // Period-7 data decoded through overlapping forward copies; the seam
    // and the ring wrap both land mid-run.
    let bs = 128 * KB;
    let data = repeating(b"ABCDEFG", 300 * KB);
    let (packed, stats) = assert_roundtrip(&params(bs, 32), &data);
    assert!(stats.matches > 0);
    assert_split_equals(&packed, &data, bs / 2);
}

#[test]
fn any_split_point_gives_the_same_bytes() {
    let bs = 128 * KB;
    let mut data = pseudo_random(100 * KB, 61);
    let head = data[..40 * KB].to_vec();
    data.extend_from_slice(&head);
    data.extend_from_slice(&pseudo_random(30 * KB, 62));

    let (packed, _) = assert_roundtrip(&params(bs, 32), &data);
    for &d0 in &[1usize, 1000, 64 * KB, bs - KB, bs] {
        assert_split_equals(&packed, &data, d0);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handcrafted streams
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn overlapping_copy_is_a_run_replicator() {
    // Literal "ab", then copy (offset 2, len 8): forward byte copy must
    // yield "ab" repeated, not a snapshot copy of uninitialized bytes.
    let mut stream = le_stream(&[65_536, 22, 1, 8, 2, 2, 0]);
    stream.extend_from_slice(b"ab"); // literal bytes sit after the datalens
    stream.extend_from_slice(&0u32.to_le_bytes());

    let mut out = Vec::new();
    decompress(&mut Cursor::new(&stream[..]), &mut out).unwrap();
    assert_eq!(out, b"ababababab");
}

#[test]
fn copy_from_unwritten_ring_yields_zeros() {
    // Structurally valid but semantically bogus: a copy reaching behind the
    // start of the stream.  The zero-filled ring makes this defined — and
    // harmless — rather than detected; the format has no checksum.
    let mut stream = le_stream(&[65_536, 20, 1, 4, 100, 0, 0]);
    stream.extend_from_slice(&0u32.to_le_bytes());

    let mut out = Vec::new();
    decompress(&mut Cursor::new(&stream[..]), &mut out).unwrap();
    assert_eq!(out, &[0u8; 4]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Structural corruption
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn truncated_stream_propagates_short_read() {
    let data = pseudo_random(32 * KB, 63);
    let mut packed = Vec::new();
    compress(&params(128 * KB, 32), &mut Cursor::new(&data[..]), &mut packed).unwrap();
    packed.truncate(packed.len() - 6);

    let mut out = Vec::new();
    match decompress(&mut Cursor::new(&packed[..]), &mut out) {
        Err(LrepError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
        other => panic!("expected a short-read error, got {other:?}"),
    }
}

#[test]
fn offset_outside_window_is_rejected() {
    // offset 70000 with block_size 65536.
    let mut stream = le_stream(&[65_536, 20, 1, 4, 70_000, 0, 0]);
    stream.extend_from_slice(&0u32.to_le_bytes());
    let mut out = Vec::new();
    match decompress(&mut Cursor::new(&stream[..]), &mut out) {
        Err(LrepError::CorruptFrame(_)) => {}
        other => panic!("expected CorruptFrame, got {other:?}"),
    }
}

#[test]
fn record_table_overrunning_block_is_rejected() {
    // num = 1000 cannot fit in an 8-byte payload.
    let stream = le_stream(&[65_536, 8, 1000, 0, 0]);
    let mut out = Vec::new();
    match decompress(&mut Cursor::new(&stream[..]), &mut out) {
        Err(LrepError::CorruptFrame(_)) => {}
        other => panic!("expected CorruptFrame, got {other:?}"),
    }
}

#[test]
fn undersized_block_is_rejected() {
    // ComprSize 4 cannot even hold num + one literal length.
    let stream = le_stream(&[65_536, 4, 0, 0]);
    let mut out = Vec::new();
    match decompress(&mut Cursor::new(&stream[..]), &mut out) {
        Err(LrepError::CorruptFrame(_)) => {}
        other => panic!("expected CorruptFrame, got {other:?}"),
    }
}

#[test]
fn literal_lengths_disagreeing_with_size_are_rejected() {
    // num = 0, one literal run of 5 bytes declared, none present.
    let stream = le_stream(&[65_536, 8, 0, 5, 0]);
    let mut out = Vec::new();
    match decompress(&mut Cursor::new(&stream[..]), &mut out) {
        Err(LrepError::CorruptFrame(_)) => {}
        other => panic!("expected CorruptFrame, got {other:?}"),
    }
}

#[test]
fn zero_window_header_is_rejected() {
    let stream = le_stream(&[0, 0]);
    let mut out = Vec::new();
    match decompress(&mut Cursor::new(&stream[..]), &mut out) {
        Err(LrepError::CorruptFrame(_)) => {}
        other => panic!("expected CorruptFrame, got {other:?}"),
    }
}
