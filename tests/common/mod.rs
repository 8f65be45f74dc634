#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use sigbench::domain::bar::Bar;
use sigbench::domain::series::PriceSeries;

/// Timestamp for bar `index` on a 4-hour grid starting 2024-01-01 00:00.
pub fn ts(index: usize) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + chrono::Duration::hours(4 * index as i64)
}

pub fn ohlc(index: usize, open: f64, high: f64, low: f64, close: f64) -> Bar {
    Bar {
        timestamp: ts(index),
        open,
        high,
        low,
        close,
    }
}

pub fn series(bars: Vec<Bar>) -> PriceSeries {
    PriceSeries::new(bars).unwrap()
}

/// Two up signal bars, then an entry bar whose high reaches the 2R target.
pub fn bullish_target_hit() -> PriceSeries {
    series(vec![
        ohlc(0, 1.00, 1.02, 0.99, 1.01),
        ohlc(1, 1.01, 1.03, 1.00, 1.02),
        ohlc(2, 1.02, 1.09, 1.01, 1.08),
        ohlc(3, 1.08, 1.09, 1.07, 1.085),
    ])
}

/// Same signal bars, but the entry bar falls through the stop instead.
pub fn bullish_stop_hit() -> PriceSeries {
    series(vec![
        ohlc(0, 1.00, 1.02, 0.99, 1.01),
        ohlc(1, 1.01, 1.03, 1.00, 1.02),
        ohlc(2, 1.02, 1.025, 0.90, 0.91),
        ohlc(3, 0.91, 0.92, 0.89, 0.90),
    ])
}

/// Too short for any rule to fire under default windows.
pub fn quiet_series() -> PriceSeries {
    series(vec![
        ohlc(0, 1.00, 1.02, 0.99, 1.01),
        ohlc(1, 1.01, 1.03, 1.00, 1.00),
        ohlc(2, 1.00, 1.01, 0.98, 0.99),
    ])
}
