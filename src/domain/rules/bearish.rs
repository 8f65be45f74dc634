//! Bearish continuation rule.

use super::{resolve_exit, Direction, RuleParams, SignalRule, BEARISH_CONTINUATION};
use crate::domain::bar::Bar;
use crate::domain::series::PriceSeries;
use crate::domain::trade::Trade;

/// Mirror of [`super::BullishContinuation`]: fires after `window` consecutive
/// down-bars ending at `i - 1`.
///
/// Entry at `open[i]`, stop at the highest high of the signal bars, target at
/// `entry - R * (stop - entry)`.
#[derive(Debug, Clone)]
pub struct BearishContinuation {
    params: RuleParams,
}

impl BearishContinuation {
    pub fn new(params: RuleParams) -> Self {
        BearishContinuation { params }
    }
}

impl SignalRule for BearishContinuation {
    fn id(&self) -> &'static str {
        BEARISH_CONTINUATION
    }

    fn window(&self) -> usize {
        self.params.window
    }

    fn scan(&self, series: &PriceSeries) -> Vec<Trade> {
        let w = self.params.window;
        if series.len() < w + 2 {
            return Vec::new();
        }

        let bars = series.bars();
        let mut trades = Vec::new();
        for i in w..=bars.len() - 2 {
            let signal = &bars[i - w..i];
            if !signal.iter().all(Bar::is_down) {
                continue;
            }

            let entry = bars[i].open;
            let stop = signal
                .iter()
                .map(|b| b.high)
                .fold(f64::NEG_INFINITY, f64::max);
            let target = entry - self.params.reward_risk_ratio * (stop - entry);
            let (exit_time, exit_price) =
                resolve_exit(series, i, Direction::Short, stop, target, self.params.fill);

            trades.push(Trade {
                strategy_id: self.id().to_string(),
                entry_time: bars[i].timestamp,
                exit_time,
                entry_price: entry,
                exit_price,
                pnl: (entry - exit_price) * self.params.position_units,
            });
        }
        trades
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::test_support::*;
    use crate::domain::rules::FillModel;
    use approx::assert_relative_eq;

    #[test]
    fn short_series_yields_no_trades() {
        let rule = BearishContinuation::new(params(2));
        assert!(rule.scan(&series(vec![])).is_empty());
        let s = series(vec![bar(0, 1.02, 1.00), bar(1, 1.00, 0.98), bar(2, 0.98, 0.96)]);
        assert!(rule.scan(&s).is_empty());
    }

    #[test]
    fn two_down_bars_emit_one_trade() {
        let s = series(vec![
            ohlc(0, 1.04, 1.05, 1.01, 1.02),
            ohlc(1, 1.02, 1.03, 0.99, 1.00),
            ohlc(2, 1.00, 1.01, 0.97, 0.98),
            ohlc(3, 0.98, 0.99, 0.95, 0.96),
        ]);
        let rule = BearishContinuation::new(params(2));
        let trades = rule.scan(&s);

        assert_eq!(trades.len(), 1);
        let trade = &trades[0];
        let entry = 1.00; // open of bar 2
        let stop = 1.05; // max(high[0], high[1])
        let target = entry - 2.0 * (stop - entry);
        assert_eq!(trade.entry_time, ts(2));
        assert_eq!(trade.exit_time, ts(2));
        assert_relative_eq!(trade.entry_price, entry);
        assert_relative_eq!(trade.exit_price, target, epsilon = 1e-12);
        // Short pnl is positive when the target below entry is realized.
        assert_relative_eq!(trade.pnl, (entry - target) * 1000.0, epsilon = 1e-9);
        assert!(trade.pnl > 0.0);
    }

    #[test]
    fn up_bar_in_signal_window_suppresses_trade() {
        let s = series(vec![
            ohlc(0, 1.00, 1.04, 0.99, 1.03),
            ohlc(1, 1.02, 1.03, 0.99, 1.00),
            ohlc(2, 1.00, 1.01, 0.97, 0.98),
            ohlc(3, 0.98, 0.99, 0.95, 0.96),
            ohlc(4, 0.96, 0.97, 0.93, 0.94),
        ]);
        let rule = BearishContinuation::new(params(2));
        let trades = rule.scan(&s);
        // Only the window over bars 1 and 2 fires.
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].entry_time, ts(3));
    }

    #[test]
    fn first_touch_fill_can_exit_at_stop() {
        let mut p = params(2);
        p.fill = FillModel::FirstTouch;
        // Two down-bars, then the decision bar rallies through the stop.
        let s = series(vec![
            ohlc(0, 1.04, 1.05, 1.01, 1.02),
            ohlc(1, 1.02, 1.03, 0.99, 1.00),
            ohlc(2, 1.00, 1.06, 0.99, 1.05),
            ohlc(3, 1.05, 1.07, 1.04, 1.06),
        ]);
        let rule = BearishContinuation::new(p);
        let trades = rule.scan(&s);

        assert_eq!(trades.len(), 1);
        let trade = &trades[0];
        assert_relative_eq!(trade.exit_price, 1.05); // stop = max(high[0], high[1])
        assert!(trade.pnl < 0.0);
    }
}
