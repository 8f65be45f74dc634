//! Backtest orchestration: configuration, rule execution, result assembly.

use std::collections::HashMap;

use super::equity::EquityCurve;
use super::error::SigbenchError;
use super::metrics::Metrics;
use super::rules::{build_rule, default_window, FillModel, RuleParams};
use super::series::PriceSeries;
use super::trade::TradeBook;

/// Parameters for one backtest run.
///
/// Passed explicitly into [`run_backtest`]; independent runs with different
/// parameters never interfere.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    pub reward_risk_ratio: f64,
    /// Fixed position-size multiplier applied to per-unit pnl.
    pub position_units: f64,
    pub fill_model: FillModel,
    /// Rule identifiers in registration order; the order is the tie-break
    /// for trades with equal exit times.
    pub active_rules: Vec<String>,
    /// Per-rule lookback overrides; absent rules use their default window.
    pub windows: HashMap<String, usize>,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            initial_capital: 100_000.0,
            reward_risk_ratio: 2.0,
            position_units: 1000.0,
            fill_model: FillModel::Optimistic,
            active_rules: super::rules::known_rules()
                .iter()
                .map(|id| id.to_string())
                .collect(),
            windows: HashMap::new(),
        }
    }
}

impl BacktestConfig {
    /// Fail fast before any rule runs.
    pub fn validate(&self) -> Result<(), SigbenchError> {
        if self.initial_capital <= 0.0 {
            return Err(invalid("initial_capital", "must be positive"));
        }
        if self.reward_risk_ratio <= 0.0 {
            return Err(invalid("reward_risk_ratio", "must be positive"));
        }
        if self.position_units <= 0.0 {
            return Err(invalid("position_units", "must be positive"));
        }
        if self.active_rules.is_empty() {
            return Err(invalid("rules", "at least one rule must be active"));
        }
        for id in &self.active_rules {
            if default_window(id).is_none() {
                return Err(SigbenchError::UnknownRule { id: id.clone() });
            }
        }
        for (id, window) in &self.windows {
            if *window == 0 {
                return Err(SigbenchError::ConfigInvalid {
                    section: "windows".to_string(),
                    key: id.clone(),
                    reason: "window must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Lookback window for a rule: configured override, else the rule's
    /// default. Unknown identifiers are caught by [`Self::validate`].
    pub fn window_for(&self, id: &str) -> usize {
        self.windows
            .get(id)
            .copied()
            .or_else(|| default_window(id))
            .unwrap_or(2)
    }
}

fn invalid(key: &str, reason: &str) -> SigbenchError {
    SigbenchError::ConfigInvalid {
        section: "backtest".to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Everything a reporter needs from one run.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub trade_book: TradeBook,
    pub equity_curve: EquityCurve,
    pub metrics: Metrics,
}

/// Run all active rules over the series and fold their trades into an
/// equity curve and metrics.
///
/// Rules are independent and read-only over the series; the merge applies a
/// deterministic total order (exit time, then rule registration order, then
/// emission order), so any evaluation order produces the same book. Zero
/// trades is a valid outcome: the curve degenerates to its initial point and
/// every ratio reports undefined.
pub fn run_backtest(
    series: &PriceSeries,
    config: &BacktestConfig,
) -> Result<BacktestResult, SigbenchError> {
    config.validate()?;

    let mut per_rule = Vec::with_capacity(config.active_rules.len());
    for id in &config.active_rules {
        let params = RuleParams {
            window: config.window_for(id),
            reward_risk_ratio: config.reward_risk_ratio,
            position_units: config.position_units,
            fill: config.fill_model,
        };
        let rule = build_rule(id, params)?;
        per_rule.push(rule.scan(series));
    }

    let trade_book = TradeBook::assemble(per_rule);
    let start = series
        .first()
        .map(|bar| bar.timestamp)
        .unwrap_or_else(|| chrono::DateTime::<chrono::Utc>::UNIX_EPOCH.naive_utc());
    let equity_curve = EquityCurve::from_trades(start, config.initial_capital, &trade_book);
    let metrics = Metrics::compute(&equity_curve, &trade_book);

    Ok(BacktestResult {
        trade_book,
        equity_curve,
        metrics,
    })
}
