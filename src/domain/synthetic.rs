//! Seeded random-walk OHLC series generation.
//!
//! Stands in for real market data in demos and smoke tests; the generated
//! bars satisfy the [`PriceSeries`] invariants by construction.

use chrono::{Duration, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::bar::Bar;
use super::error::SigbenchError;
use super::series::PriceSeries;

const BAR_INTERVAL_HOURS: i64 = 4;

pub struct SyntheticSeries {
    rng: StdRng,
    base_price: f64,
}

impl SyntheticSeries {
    /// Seeded for reproducibility: the same seed yields the same series.
    pub fn new(seed: u64) -> Self {
        SyntheticSeries {
            rng: StdRng::seed_from_u64(seed),
            base_price: 1.25,
        }
    }

    pub fn with_base_price(mut self, base_price: f64) -> Self {
        self.base_price = base_price;
        self
    }

    /// Random-walk 4-hour bars starting at `start`.
    pub fn generate(
        &mut self,
        start: NaiveDateTime,
        count: usize,
    ) -> Result<PriceSeries, SigbenchError> {
        let mut bars = Vec::with_capacity(count);
        let mut level = self.base_price;
        for i in 0..count {
            let timestamp = start + Duration::hours(BAR_INTERVAL_HOURS * i as i64);
            level += self.rng.gen_range(-0.01..0.01);
            bars.push(self.make_bar(level, timestamp));
        }
        PriceSeries::new(bars)
    }

    fn make_bar(&mut self, level: f64, timestamp: NaiveDateTime) -> Bar {
        let open = level + self.rng.gen_range(-0.001..0.001);
        let close = level + self.rng.gen_range(-0.001..0.001);
        let high = open.max(close) + self.rng.gen_range(0.0..0.002);
        let low = open.min(close) - self.rng.gen_range(0.0..0.002);
        Bar {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn generates_requested_count() {
        let series = SyntheticSeries::new(42).generate(start(), 200).unwrap();
        assert_eq!(series.len(), 200);
    }

    #[test]
    fn same_seed_same_series() {
        let a = SyntheticSeries::new(7).generate(start(), 100).unwrap();
        let b = SyntheticSeries::new(7).generate(start(), 100).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = SyntheticSeries::new(1).generate(start(), 100).unwrap();
        let b = SyntheticSeries::new(2).generate(start(), 100).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn bars_are_four_hours_apart() {
        let series = SyntheticSeries::new(42).generate(start(), 10).unwrap();
        for pair in series.bars().windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(4));
        }
    }

    #[test]
    fn base_price_anchors_the_walk() {
        let series = SyntheticSeries::new(42)
            .with_base_price(100.0)
            .generate(start(), 50)
            .unwrap();
        for bar in series.bars() {
            assert!((bar.close - 100.0).abs() < 5.0);
        }
    }
}
