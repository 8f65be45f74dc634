//! Realized trade records and the merged trade book.

use chrono::NaiveDateTime;

/// A realized trade emitted by a signal rule.
///
/// `pnl` is in account currency, already scaled by the configured
/// position-size multiplier. `exit_time >= entry_time`; same-bar exits model
/// fills realized on the entry bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub strategy_id: String,
    pub entry_time: NaiveDateTime,
    pub exit_time: NaiveDateTime,
    pub entry_price: f64,
    pub exit_price: f64,
    pub pnl: f64,
}

/// Trades from all active rules, merged and sorted by exit time.
///
/// The sort is stable over the concatenation of per-rule outputs in rule
/// registration order, so equal exit times break by rule order, then by
/// emission order within a rule. The book is rebuilt each run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeBook {
    trades: Vec<Trade>,
}

impl TradeBook {
    /// Merge per-rule trade sequences, given in rule registration order.
    pub fn assemble(per_rule: Vec<Vec<Trade>>) -> Self {
        let mut trades: Vec<Trade> = per_rule.into_iter().flatten().collect();
        trades.sort_by_key(|t| t.exit_time);
        TradeBook { trades }
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn total_pnl(&self) -> f64 {
        self.trades.iter().map(|t| t.pnl).sum()
    }
}
