//! Performance benchmarks for nova-websearch.
//!
//! Run with: cargo bench
//!
//! Matching runs on every keystroke, so it has to stay well below a
//! millisecond even for large engine lists.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nova_websearch::core::{fallbacks, rank_items, sort_by_score};
use nova_websearch::defaults::default_engines;
use nova_websearch::storage::{parse_engines, to_json};
use nova_websearch::SearchEngine;

/// Default engines plus generated ones, `count` in total.
fn engine_list(count: usize) -> Vec<SearchEngine> {
    let mut engines = default_engines(true);
    for i in engines.len()..count {
        engines.push(SearchEngine {
            id: format!("{:08x}", i),
            name: format!("Engine {}", i),
            trigger: format!("e{}", i),
            url: format!("https://engine{}.test/search?q=%s", i),
            icon_reference: ":default".to_string(),
            fallback: i % 3 == 0,
        });
    }
    engines
}

/// Benchmark trigger matching for typical queries.
fn bench_rank_items(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_items");

    for count in [7, 100, 1000] {
        let engines = engine_list(count);

        for (name, query) in [("prefix", "g"), ("trigger", "gg rust borrow checker")] {
            group.bench_with_input(
                BenchmarkId::new(name, count),
                &engines,
                |b, engines| {
                    b.iter(|| {
                        let mut results = rank_items(black_box(query), engines);
                        sort_by_score(&mut results);
                        black_box(results)
                    })
                },
            );
        }
    }

    group.finish();
}

/// Benchmark fallback selection.
fn bench_fallbacks(c: &mut Criterion) {
    let engines = engine_list(1000);

    c.bench_function("fallbacks_1000", |b| {
        b.iter(|| black_box(fallbacks(black_box("some query"), &engines)))
    });
}

/// Benchmark engine list (de)serialization.
fn bench_storage(c: &mut Criterion) {
    let engines = engine_list(500);
    let json = to_json(&engines).unwrap();

    let mut group = c.benchmark_group("storage");
    group.bench_function("serialize_500", |b| b.iter(|| black_box(to_json(&engines))));
    group.bench_function("parse_500", |b| {
        b.iter(|| black_box(parse_engines(black_box(&json), true)))
    });
    group.finish();
}

criterion_group!(benches, bench_rank_items, bench_fallbacks, bench_storage);

criterion_main!(benches);
