//! Criterion benchmarks for the match codec.
//!
//! Run with:
//!   cargo bench --bench throughput
//!
//! Three corpus shapes bracket the interesting behaviour: periodic data
//! (matcher always busy), incompressible data (probe/skip path only), and
//! a mixed stream with distant duplicated chunks (the intended workload).

use std::io::Cursor;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use lrep::corpus::{pseudo_random, repeating};
use lrep::{compress, decompress, Params};

const MB: usize = 1 << 20;

fn params() -> Params {
    Params { block_size: 8 * MB, ..Params::default() }
}

fn mixed_corpus(len: usize) -> Vec<u8> {
    let chunk = pseudo_random(256 << 10, 1);
    let mut data = Vec::with_capacity(len);
    let mut seed = 100u32;
    while data.len() < len {
        data.extend_from_slice(&pseudo_random(256 << 10, seed));
        data.extend_from_slice(&chunk);
        seed += 1;
    }
    data.truncate(len);
    data
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    let size = 8 * MB;

    let corpora = [
        ("periodic", repeating(b"0123456789abcdef", size)),
        ("random", pseudo_random(size, 42)),
        ("mixed", mixed_corpus(size)),
    ];

    for (name, data) in &corpora {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("compress", name), data, |b, data| {
            let mut out = Vec::with_capacity(data.len() + 1024);
            b.iter(|| {
                out.clear();
                compress(&params(), &mut Cursor::new(&data[..]), &mut out).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    let size = 8 * MB;

    let corpora = [
        ("periodic", repeating(b"0123456789abcdef", size)),
        ("mixed", mixed_corpus(size)),
    ];

    for (name, data) in &corpora {
        let mut packed = Vec::new();
        compress(&params(), &mut Cursor::new(&data[..]), &mut packed).unwrap();

        // Throughput measured in decompressed bytes (the meaningful quantity).
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("decompress", name), &packed, |b, packed| {
            let mut out = Vec::with_capacity(size);
            b.iter(|| {
                out.clear();
                decompress(&mut Cursor::new(&packed[..]), &mut out).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
