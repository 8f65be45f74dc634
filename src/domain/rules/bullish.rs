//! Bullish continuation rule.

use super::{resolve_exit, Direction, RuleParams, SignalRule, BULLISH_CONTINUATION};
use crate::domain::bar::Bar;
use crate::domain::series::PriceSeries;
use crate::domain::trade::Trade;

/// Fires after `window` consecutive up-bars ending at `i - 1`.
///
/// Entry at `open[i]`, stop at the lowest low of the signal bars, target at
/// `entry + R * (entry - stop)`.
#[derive(Debug, Clone)]
pub struct BullishContinuation {
    params: RuleParams,
}

impl BullishContinuation {
    pub fn new(params: RuleParams) -> Self {
        BullishContinuation { params }
    }
}

impl SignalRule for BullishContinuation {
    fn id(&self) -> &'static str {
        BULLISH_CONTINUATION
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
            if !signal.iter().all(Bar::is_up) {
                continue;
            }

            let entry = bars[i].open;
            let stop = signal.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
            let target = entry + self.params.reward_risk_ratio * (entry - stop);
            let (exit_time, exit_price) =
                resolve_exit(series, i, Direction::Long, stop, target, self.params.fill);

            trades.push(Trade {
                strategy_id: self.id().to_string(),
                entry_time: bars[i].timestamp,
                exit_time,
                entry_price: entry,
                exit_price,
                pnl: (exit_price - entry) * self.params.position_units,
            });
        }
        trades
    }
}
