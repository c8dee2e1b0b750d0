//! Property tests for the sequence forecaster.

use advisor_core::types::{Bar, Interval, PriceSeries};
use advisor_forecast::{ForecastConfig, Forecaster, Trend};
use proptest::prelude::*;

fn ramp(start: f64, step: f64, len: usize) -> PriceSeries {
    let bars = (0..len)
        .map(|i| {
            let c = start + step * i as f64;
            Bar::new(i as i64 * 86_400_000, c, c + 0.5, c - 0.5, c, 1_000.0)
        })
        .collect();
    PriceSeries::new("RAMP", Interval::Daily, bars).unwrap()
}

fn forecaster(lookback: usize, horizon_days: usize) -> Forecaster {
    Forecaster::new(ForecastConfig {
        lookback,
        horizon_days,
        ..Default::default()
    })
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn output_length_matches_horizon(
        lookback in 2usize..20,
        extra in 1usize..40,
        horizon in 1usize..30,
        closes in prop::collection::vec(10.0f64..500.0, 60),
    ) {
        let len = (lookback + extra).min(closes.len());
        prop_assume!(len > lookback);
        let bars = closes[..len]
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * 86_400_000, c, c + 1.0, c - 1.0, c, 1_000.0))
            .collect();
        let series = PriceSeries::new("RAND", Interval::Daily, bars).unwrap();

        let result = forecaster(lookback, horizon).run(&series).unwrap();
        prop_assert_eq!(result.predicted_prices.len(), horizon);
        prop_assert_eq!(result.upper_band.len(), horizon);
        prop_assert_eq!(result.lower_band.len(), horizon);
        prop_assert!((0.0..=100.0).contains(&result.confidence_score));
    }

    #[test]
    fn rising_history_is_never_a_downtrend(
        start in 5.0f64..500.0,
        step in 0.01f64..5.0,
        lookback in 2usize..20,
        extra in 1usize..40,
        horizon in 2usize..30,
    ) {
        let series = ramp(start, step, lookback + extra);
        let result = forecaster(lookback, horizon).run(&series).unwrap();
        prop_assert_ne!(result.trend, Trend::Downtrend);
    }
}
