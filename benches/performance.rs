// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for RONDO
//!
//! Run with: cargo bench
//!
//! These benchmarks measure the per-frame and per-keypress paths:
//! - Section lookup
//! - Guess submission
//! - Scoring

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rondo::ledger::Ledger;
use rondo::score::compute_score;
use rondo::timeline::{Section, SectionType, Timeline};

fn long_timeline(count: usize) -> Timeline {
    let sections = (0..count)
        .map(|i| {
            let kind = SectionType::ALL[i % SectionType::ALL.len()];
            Section::new(kind, i as f64 * 10.0, (i + 1) as f64 * 10.0)
        })
        .collect();
    Timeline::new(sections).unwrap()
}

/// Benchmark section lookup (runs every frame)
fn bench_section_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("section_at");

    for count in [7usize, 100, 1000].iter() {
        let timeline = long_timeline(*count);
        let duration = *count as f64 * 10.0;
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            let mut t = 0.0;
            b.iter(|| {
                t = (t + 3.7) % duration;
                black_box(timeline.section_at(black_box(t), duration))
            })
        });
    }

    group.finish();
}

/// Benchmark guess submission over a full round
fn bench_ledger_submit(c: &mut Criterion) {
    let timeline = Timeline::rondo_alla_turca();

    c.bench_function("ledger_full_round", |b| {
        b.iter(|| {
            let mut ledger = Ledger::new();
            for section in timeline.sections() {
                ledger.submit(&timeline, section.start + 1.0, 190.0, black_box(SectionType::A));
                ledger.submit(&timeline, section.start + 2.0, 190.0, black_box(SectionType::B));
            }
            black_box(ledger.len())
        })
    });
}

/// Benchmark score computation
fn bench_compute_score(c: &mut Criterion) {
    let timeline = Timeline::rondo_alla_turca();
    let mut ledger = Ledger::new();
    for section in timeline.sections() {
        ledger.submit(&timeline, section.start, 190.0, section.kind);
    }

    c.bench_function("compute_score", |b| {
        b.iter(|| black_box(compute_score(black_box(&ledger), timeline.len())))
    });
}

criterion_group!(benches, bench_section_at, bench_ledger_submit, bench_compute_score);
criterion_main!(benches);
