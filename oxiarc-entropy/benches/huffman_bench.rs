//! Benchmarks for canonical Huffman construction and encode/decode.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxiarc_core::bitstream::{BitReader, BitWriter};
use oxiarc_entropy::coding::Coding;
use oxiarc_entropy::frequencies::CodingFrequencies;
use oxiarc_entropy::huffman::{HuffmanCoding, HuffmanFrequencies};
use std::hint::black_box;
use std::io::Cursor;

fn text_like(size: usize) -> Vec<u8> {
    let text = b"The quick brown fox jumps over the lazy dog. ";
    let mut data = Vec::with_capacity(size);
    while data.len() < size {
        let remaining = size - data.len();
        data.extend_from_slice(&text[..remaining.min(text.len())]);
    }
    data
}

fn frequencies_for(data: &[u8]) -> HuffmanFrequencies {
    let freqs = CodingFrequencies::from_bytes(data);
    HuffmanFrequencies::Unordered((0u64..256).map(|b| freqs.frequency_at(b)).collect())
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_construction");
    for size in [256usize, 4 * 1024, 64 * 1024] {
        let data = text_like(size);
        let freqs = frequencies_for(&data);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &freqs, |b, freqs| {
            b.iter(|| {
                let coding = HuffmanCoding::from_frequencies(black_box(freqs)).unwrap();
                black_box(coding);
            });
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_encode");
    for size in [256usize, 4 * 1024, 64 * 1024] {
        let data = text_like(size);
        let coding = HuffmanCoding::from_frequencies(&frequencies_for(&data)).unwrap();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let mut output = Vec::with_capacity(data.len());
                let mut writer = BitWriter::new(&mut output);
                for &byte in data {
                    coding.encode_positive_fixed(&mut writer, byte as i32).unwrap();
                }
                writer.flush().unwrap();
                black_box(output);
            });
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_decode");
    for size in [256usize, 4 * 1024, 64 * 1024] {
        let data = text_like(size);
        let coding = HuffmanCoding::from_frequencies(&frequencies_for(&data)).unwrap();
        let mut encoded = Vec::new();
        {
            let mut writer = BitWriter::new(&mut encoded);
            for &byte in &data {
                coding.encode_positive_fixed(&mut writer, byte as i32).unwrap();
            }
            writer.flush().unwrap();
        }
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &encoded, |b, encoded| {
            b.iter(|| {
                let mut reader = BitReader::new(Cursor::new(encoded));
                for _ in 0..data.len() {
                    black_box(coding.decode_positive_fixed(&mut reader).unwrap());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_construction, bench_encode, bench_decode);
criterion_main!(benches);
