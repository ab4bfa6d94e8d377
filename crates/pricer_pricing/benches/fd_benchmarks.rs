//! Criterion benchmarks for the PSOR solver and the EEP engine.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::OptionSide;
use pricer_pricing::eep::{EarlyExercisePremiumEngine, EepInputs};
use pricer_pricing::fd::{AmericanFdSolver, AmericanOption, GridSpec};

/// Benchmark one American put across grid sizes.
fn bench_fd_grid_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("american_put");
    let solver = AmericanFdSolver::with_defaults();
    let put = AmericanOption::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionSide::Put);

    for steps in [50_usize, 100, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, &steps| {
            b.iter(|| solver.price(black_box(&put), GridSpec::new(200.0, steps, steps)))
        });
    }

    group.finish();
}

/// Benchmark a full EEP estimate on the default batch grid.
fn bench_eep(c: &mut Criterion) {
    let engine = EarlyExercisePremiumEngine::with_defaults();
    let inputs = EepInputs {
        spot: Some(100.0),
        strike: Some(95.0),
        expiry: Some(0.5),
        rate: Some(0.03),
        volatility: Some(0.3),
        pv_dividends: Some(1.5),
    };

    c.bench_function("eep_estimate_100x100", |b| {
        b.iter(|| engine.estimate(black_box(&inputs)))
    });
}

criterion_group!(benches, bench_fd_grid_sizes, bench_eep);
criterion_main!(benches);
