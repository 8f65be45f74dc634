//! Signal rules: the trait seam, fill policy, and the rule registry.
//!
//! A rule scans a read-only [`PriceSeries`] and emits zero or more realized
//! [`Trade`]s. Scan indices run from `window` to `len - 2`; a rule inspects
//! bars `[i - window, i]` and may read `open[i + 1]` only as a next-bar fill
//! price. New rules implement [`SignalRule`] and register an identifier in
//! [`build_rule`]; nothing downstream of the trade book changes.

pub mod bearish;
pub mod breakout;
pub mod bullish;

use chrono::NaiveDateTime;

use super::error::SigbenchError;
use super::series::PriceSeries;
use super::trade::Trade;

pub use bearish::BearishContinuation;
pub use breakout::Breakout;
pub use bullish::BullishContinuation;

pub const BULLISH_CONTINUATION: &str = "bullish_continuation";
pub const BEARISH_CONTINUATION: &str = "bearish_continuation";
pub const BREAKOUT: &str = "breakout";

/// How a trade's exit is resolved once entry, stop, and target are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillModel {
    /// Every trade realizes its target on the entry bar.
    #[default]
    Optimistic,
    /// Walk forward from the entry bar; exit at whichever of stop/target is
    /// touched first. Stop wins when both are touched within one bar. Trades
    /// never resolved by the end of the series close at the last bar's close.
    FirstTouch,
}

impl FillModel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "optimistic" => Some(FillModel::Optimistic),
            "first_touch" => Some(FillModel::FirstTouch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FillModel::Optimistic => "optimistic",
            FillModel::FirstTouch => "first_touch",
        }
    }
}

/// Per-rule parameters resolved from the backtest configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleParams {
    pub window: usize,
    pub reward_risk_ratio: f64,
    pub position_units: f64,
    pub fill: FillModel,
}

pub trait SignalRule: std::fmt::Debug {
    fn id(&self) -> &'static str;

    fn window(&self) -> usize;

    /// Scan the series and emit realized trades. Series shorter than
    /// `window + 2` bars yield an empty result, never an error.
    fn scan(&self, series: &PriceSeries) -> Vec<Trade>;
}

pub fn known_rules() -> [&'static str; 3] {
    [BULLISH_CONTINUATION, BEARISH_CONTINUATION, BREAKOUT]
}

pub fn default_window(id: &str) -> Option<usize> {
    match id {
        BULLISH_CONTINUATION | BEARISH_CONTINUATION => Some(2),
        BREAKOUT => Some(5),
        _ => None,
    }
}

pub fn build_rule(id: &str, params: RuleParams) -> Result<Box<dyn SignalRule>, SigbenchError> {
    match id {
        BULLISH_CONTINUATION => Ok(Box::new(BullishContinuation::new(params))),
        BEARISH_CONTINUATION => Ok(Box::new(BearishContinuation::new(params))),
        BREAKOUT => Ok(Box::new(Breakout::new(params))),
        _ => Err(SigbenchError::UnknownRule { id: id.to_string() }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Long,
    Short,
}

/// Resolve exit time and price for a trade entered at `entry_index`.
pub(crate) fn resolve_exit(
    series: &PriceSeries,
    entry_index: usize,
    direction: Direction,
    stop: f64,
    target: f64,
    fill: FillModel,
) -> (NaiveDateTime, f64) {
    let bars = series.bars();
    match fill {
        FillModel::Optimistic => (bars[entry_index].timestamp, target),
        FillModel::FirstTouch => {
            for bar in &bars[entry_index..] {
                match direction {
                    Direction::Long => {
                        if bar.low <= stop {
                            return (bar.timestamp, stop);
                        }
                        if bar.high >= target {
                            return (bar.timestamp, target);
                        }
                    }
                    Direction::Short => {
                        if bar.high >= stop {
                            return (bar.timestamp, stop);
                        }
                        if bar.low <= target {
                            return (bar.timestamp, target);
                        }
                    }
                }
            }
            let last = &bars[bars.len() - 1];
            (last.timestamp, last.close)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn fill_model_parses_known_values() {
        assert_eq!(FillModel::parse("optimistic"), Some(FillModel::Optimistic));
        assert_eq!(FillModel::parse(" First_Touch "), Some(FillModel::FirstTouch));
        assert_eq!(FillModel::parse("pessimistic"), None);
    }

    #[test]
    fn build_rule_rejects_unknown_id() {
        let err = build_rule("momentum", params(2)).unwrap_err();
        assert_eq!(err.to_string(), "unknown rule: momentum");
    }

    #[test]
    fn boxed_rules_are_debuggable() {
        let rule = build_rule(BREAKOUT, params(5)).unwrap();
        assert!(format!("{rule:?}").contains("Breakout"));
    }

    #[test]
    fn build_rule_constructs_all_known_rules() {
        for id in known_rules() {
            let window = default_window(id).unwrap();
            let rule = build_rule(id, params(window)).unwrap();
            assert_eq!(rule.id(), id);
            assert_eq!(rule.window(), window);
        }
    }

    #[test]
    fn optimistic_exit_is_target_on_entry_bar() {
        let s = series(vec![bar(0, 1.0, 1.1), bar(1, 1.1, 1.2)]);
        let (time, price) = resolve_exit(&s, 1, Direction::Long, 0.9, 1.5, FillModel::Optimistic);
        assert_eq!(time, ts(1));
        assert!((price - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn first_touch_long_hits_target() {
        let s = series(vec![
            ohlc(0, 1.00, 1.05, 0.98, 1.02),
            ohlc(1, 1.02, 1.21, 1.01, 1.20),
        ]);
        let (time, price) = resolve_exit(&s, 0, Direction::Long, 0.95, 1.21, FillModel::FirstTouch);
        assert_eq!(time, ts(1));
        assert!((price - 1.21).abs() < f64::EPSILON);
    }

    #[test]
    fn first_touch_long_stop_wins_within_one_bar() {
        // Bar 1 spans both levels; the stop takes precedence.
        let s = series(vec![
            ohlc(0, 1.00, 1.05, 0.98, 1.02),
            ohlc(1, 1.02, 1.30, 0.90, 1.25),
        ]);
        let (time, price) = resolve_exit(&s, 0, Direction::Long, 0.95, 1.21, FillModel::FirstTouch);
        assert_eq!(time, ts(1));
        assert!((price - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn first_touch_short_hits_target() {
        let s = series(vec![
            ohlc(0, 1.00, 1.01, 0.97, 0.98),
            ohlc(1, 0.98, 0.99, 0.89, 0.90),
        ]);
        let (time, price) = resolve_exit(&s, 0, Direction::Short, 1.05, 0.90, FillModel::FirstTouch);
        assert_eq!(time, ts(1));
        assert!((price - 0.90).abs() < f64::EPSILON);
    }

    #[test]
    fn first_touch_unresolved_closes_at_last_bar() {
        let s = series(vec![
            ohlc(0, 1.00, 1.01, 0.99, 1.00),
            ohlc(1, 1.00, 1.02, 0.99, 1.01),
        ]);
        let (time, price) = resolve_exit(&s, 0, Direction::Long, 0.50, 2.00, FillModel::FirstTouch);
        assert_eq!(time, ts(1));
        assert!((price - 1.01).abs() < f64::EPSILON);
    }
}
