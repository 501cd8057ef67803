//! Benchmarks for cache construction and dataset item derivation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ethash::H256;

const CACHE_ROWS: usize = 4096;

fn bench_make_cache(c: &mut Criterion) {
    let seed = ethash::seed_hash(1);
    c.bench_function("make_cache_256k", |b| {
        let mut cache = vec![0u8; CACHE_ROWS * 64];
        b.iter(|| ethash::make_cache(black_box(&mut cache), &seed).unwrap())
    });
}

fn bench_dataset_item(c: &mut Criterion) {
    let mut cache = vec![0u8; CACHE_ROWS * 64];
    ethash::make_cache(&mut cache, &H256::zero()).unwrap();

    c.bench_function("dataset_item", |b| {
        let mut index: u32 = 0;
        b.iter(|| {
            index = index.wrapping_add(1);
            ethash::calc_dataset_item(black_box(&cache), index).unwrap()
        })
    });

    c.bench_function("make_dataset_4096", |b| {
        let mut dataset = vec![0u8; 4096 * 64];
        b.iter(|| ethash::make_dataset(black_box(&mut dataset), &cache).unwrap())
    });
}

criterion_group!(benches, bench_make_cache, bench_dataset_item);
criterion_main!(benches);
