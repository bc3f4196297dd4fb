//! Benchmarks for the proximity embedding stages and full pipeline
//!
//! Run with: cargo bench --bench embed_benchmark
//! HTML reports: target/criterion/report/index.html

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fast_proximity::{
    co_occurrence, filter_significant, CooccurrenceBuilder, EmbedPipeline, Relation, RelationTable,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Synthetic relational data with overlapping entity sets.
fn create_benchmark_table(n_rows: usize, categories: usize, entities: usize) -> RelationTable {
    let mut rng = StdRng::seed_from_u64(42);
    RelationTable::from_rows(
        (0..n_rows)
            .map(|i| {
                Relation::new(
                    format!("cat{}", i % categories),
                    format!("ent{}", i % entities),
                    rng.random_range(1..100) as f64,
                )
            })
            .collect(),
    )
}

fn bench_significance_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("significance_filter");

    for &n_rows in &[1_000usize, 10_000, 50_000] {
        let table = create_benchmark_table(n_rows, 100, 100);
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &table, |b, table| {
            b.iter(|| filter_significant(black_box(table)));
        });
    }

    group.finish();
}

fn bench_co_occurrence(c: &mut Criterion) {
    let mut group = c.benchmark_group("co_occurrence");
    let table = create_benchmark_table(10_000, 200, 60);

    group.bench_function("serial", |b| {
        let builder = CooccurrenceBuilder::new(true).parallel(false);
        b.iter(|| builder.build(black_box(&table)));
    });
    group.bench_function("parallel", |b| {
        let builder = CooccurrenceBuilder::new(true).parallel(true);
        b.iter(|| builder.build(black_box(&table)));
    });

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let table = create_benchmark_table(10_000, 100, 60);
    let pipeline = EmbedPipeline::builder().collect_stats(false).build();

    c.bench_function("full_pipeline_10k", |b| {
        b.iter(|| pipeline.run(black_box(table.clone())).unwrap());
    });

    c.bench_function("co_occurrence_unfiltered_10k", |b| {
        b.iter(|| co_occurrence(black_box(&table), true));
    });
}

criterion_group!(
    benches,
    bench_significance_filter,
    bench_co_occurrence,
    bench_full_pipeline
);
criterion_main!(benches);
