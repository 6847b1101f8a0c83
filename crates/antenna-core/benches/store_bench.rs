//! # Store Benchmarks
//!
//! Performance benchmarks for antenna-core store and derivation operations.
//!
//! Run with: `cargo bench -p antenna-core`

use antenna_core::{
    Antenna, AntennaList, AntennaStore, Frequency, GridReader, NefastoDeriver, encode_records,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Create a store with N antennas spread over a square grid.
fn create_scattered_store(size: usize) -> AntennaList {
    let side = (size as i32).max(1);
    let mut store = AntennaList::new();

    for i in 0..size as i32 {
        let x = (i * 7) % side;
        let y = (i * 13) % side;
        let label = Frequency::from_byte(b'A' + (i % 26) as u8);
        let _ = store.insert(Antenna::at(x, y, label));
    }

    store
}

/// Render a dense text grid with one antenna every third cell.
fn create_grid_text(rows: usize, cols: usize) -> String {
    let mut text = String::with_capacity(rows * (cols + 1));
    for row in 0..rows {
        for col in 0..cols {
            text.push(if (row + col) % 3 == 0 { 'A' } else { '.' });
        }
        text.push('\n');
    }
    text
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertion");

    for size in [100, 1000, 5000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| black_box(create_scattered_store(size)));
        });
    }

    group.finish();
}

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");

    for size in [50, 200, 500].iter() {
        let store = create_scattered_store(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &store, |b, store| {
            b.iter(|| {
                let mut store = store.clone();
                black_box(NefastoDeriver::derive_silent(&mut store))
            });
        });
    }

    group.finish();
}

fn bench_grid_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_parse");

    for side in [16, 64, 128].iter() {
        let text = create_grid_text(*side, *side);

        group.bench_with_input(BenchmarkId::from_parameter(side), &text, |b, text| {
            b.iter(|| black_box(GridReader::parse_str(text)));
        });
    }

    group.finish();
}

fn bench_encode_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_records");

    for size in [100, 1000, 5000].iter() {
        let store = create_scattered_store(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(encode_records(&store)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insertion,
    bench_derive,
    bench_grid_parse,
    bench_encode_records,
);

criterion_main!(benches);
