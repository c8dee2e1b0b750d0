//! Benchmarks for the Monte Carlo simulator.

use advisor_core::types::{Bar, Interval, PriceSeries};
use advisor_simulation::simulate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn generate_series(size: usize) -> PriceSeries {
    let bars = (0..size)
        .map(|i| {
            let c = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            Bar::new(i as i64 * 86_400, c, c + 1.0, c - 1.0, c, 1_000_000.0)
        })
        .collect();
    PriceSeries::new("BENCH", Interval::Daily, bars).expect("valid series")
}

fn benchmark_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("MonteCarlo");
    let series = generate_series(252);

    for count in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::new("paths", count), count, |b, &count| {
            b.iter(|| simulate(black_box(&series), 252, count, Some(42)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_simulate);
criterion_main!(benches);
