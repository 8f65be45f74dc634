//! Trailing-range breakout rule.

use super::{resolve_exit, Direction, RuleParams, SignalRule, BREAKOUT};
use crate::domain::series::PriceSeries;
use crate::domain::trade::Trade;

/// Fires when `close[i]` clears the highest high of the trailing window
/// `[i - window, i)`.
///
/// Entry at the next bar's open (the one lawful forward reference), stop at
/// the lowest low of the window, target via the same R-multiple as the
/// continuation rules.
#[derive(Debug, Clone)]
pub struct Breakout {
    params: RuleParams,
}

impl Breakout {
    pub fn new(params: RuleParams) -> Self {
        Breakout { params }
    }
}

impl SignalRule for Breakout {
    fn id(&self) -> &'static str {
        BREAKOUT
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
            let window = &bars[i - w..i];
            let window_high = window
                .iter()
                .map(|b| b.high)
                .fold(f64::NEG_INFINITY, f64::max);
            if bars[i].close <= window_high {
                continue;
            }

            let entry = bars[i + 1].open;
            let stop = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
            let target = entry + self.params.reward_risk_ratio * (entry - stop);
            let (exit_time, exit_price) = resolve_exit(
                series,
                i + 1,
                Direction::Long,
                stop,
                target,
                self.params.fill,
            );

            trades.push(Trade {
                strategy_id: self.id().to_string(),
                entry_time: bars[i + 1].timestamp,
                exit_time,
                entry_price: entry,
                exit_price,
                pnl: (exit_price - entry) * self.params.position_units,
            });
        }
        trades
    }
}
