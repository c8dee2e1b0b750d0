//! Benchmarks for indicator implementations.

use advisor_core::traits::{Indicator, OhlcvIndicator};
use advisor_core::types::{Bar, Interval, PriceSeries};
use advisor_indicators::{Atr, IndicatorEngine, IndicatorWindows, Rsi, Sma};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn generate_series(size: usize) -> PriceSeries {
    let bars = generate_test_data(size)
        .into_iter()
        .enumerate()
        .map(|(i, c)| Bar::new(i as i64 * 86_400, c, c + 1.5, c - 1.5, c, 1_000_000.0))
        .collect();
    PriceSeries::new("BENCH", Interval::Daily, bars).expect("valid series")
}

fn benchmark_sma(c: &mut Criterion) {
    let mut group = c.benchmark_group("SMA");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("sma50", size), &data, |b, data| {
            let sma = Sma::new(50);
            b.iter(|| sma.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_rsi(c: &mut Criterion) {
    let mut group = c.benchmark_group("RSI");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("rsi14", size), &data, |b, data| {
            let rsi = Rsi::new(14);
            b.iter(|| rsi.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_atr(c: &mut Criterion) {
    let data = generate_test_data(10000);
    let high: Vec<f64> = data.iter().map(|x| x + 1.0).collect();
    let low: Vec<f64> = data.iter().map(|x| x - 1.0).collect();

    c.bench_function("ATR/atr14/10000", |b| {
        let atr = Atr::new(14);
        b.iter(|| atr.calculate(black_box(&high), black_box(&low), black_box(&data)))
    });
}

fn benchmark_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("IndicatorEngine");
    let engine = IndicatorEngine::new(IndicatorWindows::default()).expect("default windows");

    for size in [252, 1260, 5040].iter() {
        let series = generate_series(*size);
        group.bench_with_input(BenchmarkId::new("compute", size), &series, |b, series| {
            b.iter(|| engine.compute(black_box(series)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_sma, benchmark_rsi, benchmark_atr, benchmark_engine);
criterion_main!(benches);
