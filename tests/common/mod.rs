//! Shared helpers for the integration suites: a compressed-stream walker
//! and roundtrip plumbing.

#![allow(dead_code)]

use std::io::Cursor;

use lrep::{compress, decompress, CodecStats, Params};

/// One parsed block frame (the terminator parses as a block with no
/// records, followed by the end-of-stream sentinel).
#[derive(Debug, Clone)]
pub struct Block {
    pub compr_size: usize,
    pub lens: Vec<u32>,
    pub offsets: Vec<u32>,
    pub datalens: Vec<u32>,
}

impl Block {
    pub fn num(&self) -> usize {
        self.lens.len()
    }

    /// Input bytes this block accounts for: literals plus match lengths.
    pub fn covered(&self) -> u64 {
        let lit: u64 = self.datalens.iter().map(|&d| d as u64).sum();
        let mat: u64 = self.lens.iter().map(|&l| l as u64).sum();
        lit + mat
    }
}

/// Fully parsed compressed stream.
#[derive(Debug)]
pub struct Stream {
    pub block_size: usize,
    pub blocks: Vec<Block>,
}

impl Stream {
    pub fn all_matches(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.blocks
            .iter()
            .flat_map(|b| b.lens.iter().copied().zip(b.offsets.iter().copied()))
    }
}

fn get_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
}

/// Walk a compressed stream, checking the framing arithmetic as it goes.
/// Panics on any structural inconsistency — these helpers are for tests.
pub fn parse_stream(bytes: &[u8]) -> Stream {
    let block_size = get_u32(bytes, 0) as usize;
    let mut at = 4usize;
    let mut blocks = Vec::new();
    loop {
        let compr_size = get_u32(bytes, at) as usize;
        at += 4;
        if compr_size == 0 {
            break;
        }
        let payload = &bytes[at..at + compr_size];
        at += compr_size;

        let num = get_u32(payload, 0) as usize;
        let lens: Vec<u32> = (0..num).map(|j| get_u32(payload, 4 + 4 * j)).collect();
        let offsets: Vec<u32> = (0..num)
            .map(|j| get_u32(payload, 4 + 4 * num + 4 * j))
            .collect();
        let datalens: Vec<u32> = (0..=num)
            .map(|j| get_u32(payload, 4 + 8 * num + 4 * j))
            .collect();

        let lit_total: usize = datalens.iter().map(|&d| d as usize).sum();
        assert_eq!(
            compr_size,
            4 + 4 * num + 4 * num + 4 * (num + 1) + lit_total,
            "compr_size must equal its fixed fields plus the literal bytes"
        );

        blocks.push(Block { compr_size, lens, offsets, datalens });
    }
    assert_eq!(at, bytes.len(), "nothing may follow the end-of-stream sentinel");
    Stream { block_size, blocks }
}

/// Compress `data`, decompress the result, and hand back every artifact.
pub fn roundtrip(params: &Params, data: &[u8]) -> (Vec<u8>, Vec<u8>, CodecStats) {
    let mut packed = Vec::new();
    let stats = compress(params, &mut Cursor::new(data), &mut packed).expect("compress");
    assert_eq!(stats.bytes_in, data.len() as u64);
    assert_eq!(stats.bytes_out, packed.len() as u64);

    let mut unpacked = Vec::new();
    let dstats = decompress(&mut Cursor::new(&packed[..]), &mut unpacked).expect("decompress");
    assert_eq!(dstats.bytes_out, unpacked.len() as u64);
    assert_eq!(dstats.bytes_in, packed.len() as u64);
    (packed, unpacked, stats)
}

/// `roundtrip` plus the identity assertion.
pub fn assert_roundtrip(params: &Params, data: &[u8]) -> (Vec<u8>, CodecStats) {
    let (packed, unpacked, stats) = roundtrip(params, data);
    assert_eq!(unpacked.len(), data.len(), "roundtrip must preserve length");
    assert!(unpacked == data, "roundtrip must preserve content");
    (packed, stats)
}
