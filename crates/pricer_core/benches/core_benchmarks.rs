//! Criterion benchmarks for pricer_core rate lookups.
//!
//! Measures bucket interpolation on full and sparse snapshots, and as-of
//! lookups against a multi-year daily history.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::{Country, RateCurveHistory, RateSnapshot, RiskFreeRateInterpolator};
use pricer_core::types::Date;

fn snapshot(date: Date, every: usize) -> RateSnapshot {
    let mut snap = RateSnapshot::new(date);
    for (i, series) in Country::Norway.series().iter().enumerate() {
        if i % every == 0 {
            snap.insert(*series, 0.03 + 0.001 * i as f64);
        }
    }
    snap
}

/// Benchmark interpolation on dense and sparse bucket tables.
fn bench_interpolate(c: &mut Criterion) {
    let mut group = c.benchmark_group("rate_interpolate");
    let interp = RiskFreeRateInterpolator::new(Country::Norway);
    let date = Date::from_ymd(2024, 1, 2).unwrap();

    for every in [1usize, 3] {
        let snap = snapshot(date, every);
        group.bench_with_input(BenchmarkId::new("every", every), &snap, |b, snap| {
            let targets: Vec<f64> = (0..100).map(|i| i as f64 * 5.0).collect();
            b.iter(|| {
                for &t in &targets {
                    let _ = interp.interpolate(black_box(snap), black_box(t));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark as-of lookups on a daily history.
fn bench_as_of(c: &mut Criterion) {
    let start = Date::from_ymd(2015, 1, 1).unwrap();
    let history =
        RateCurveHistory::from_snapshots((0..3650).map(|i| snapshot(start.add_days(i), 1))).unwrap();
    let query = start.add_days(1800);

    c.bench_function("rate_history_as_of", |b| {
        b.iter(|| history.as_of(black_box(query)))
    });
}

criterion_group!(benches, bench_interpolate, bench_as_of);
criterion_main!(benches);
