//! Risk-adjusted performance statistics.

use super::equity::{DailyPoint, EquityCurve, EquityPoint};
use super::trade::TradeBook;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;
const CALENDAR_DAYS_PER_YEAR: f64 = 365.0;

/// Performance summary for one backtest run.
///
/// Ratios that have no defined value (zero variance, empty downside subset,
/// degenerate curve) are `None`, never a silent zero or NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub sharpe: Option<f64>,
    pub sortino: Option<f64>,
    pub calmar: Option<f64>,
    pub cagr: Option<f64>,
    pub max_drawdown: f64,
    pub total_trades: usize,
    pub final_capital: f64,
}

impl Metrics {
    /// Compute all statistics from an equity curve and its trade book.
    ///
    /// Return-based metrics use the daily projection; max drawdown uses the
    /// raw per-exit points so an intraday dip between two exits on the same
    /// day still counts.
    pub fn compute(curve: &EquityCurve, book: &TradeBook) -> Self {
        let daily = curve.resample_daily();
        let returns = daily_returns(&daily);

        let cagr = compute_cagr(curve.initial_capital(), &daily);
        let max_drawdown = compute_drawdown(curve.points());
        let calmar = match cagr {
            Some(c) if max_drawdown != 0.0 => Some(c / max_drawdown.abs()),
            _ => None,
        };

        Metrics {
            sharpe: sharpe_ratio(&returns),
            sortino: sortino_ratio(&returns),
            calmar,
            cagr,
            max_drawdown,
            total_trades: book.len(),
            final_capital: curve.final_capital(),
        }
    }
}

/// Daily simple returns; the first daily point has no defined return.
fn daily_returns(daily: &[DailyPoint]) -> Vec<f64> {
    daily
        .windows(2)
        .map(|w| w[1].capital / w[0].capital - 1.0)
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1); `None` below two observations.
fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

fn sharpe_ratio(returns: &[f64]) -> Option<f64> {
    if returns.iter().any(|r| !r.is_finite()) {
        return None;
    }
    let sd = sample_std(returns)?;
    if sd == 0.0 {
        return None;
    }
    Some(mean(returns) / sd * TRADING_DAYS_PER_YEAR.sqrt())
}

fn sortino_ratio(returns: &[f64]) -> Option<f64> {
    if returns.is_empty() || returns.iter().any(|r| !r.is_finite()) {
        return None;
    }
    let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    let sd = sample_std(&downside)?;
    if sd == 0.0 {
        return None;
    }
    Some(mean(returns) / sd * TRADING_DAYS_PER_YEAR.sqrt())
}

fn compute_cagr(initial_capital: f64, daily: &[DailyPoint]) -> Option<f64> {
    let first = daily.first()?;
    let last = daily.last()?;
    let total_days = (last.date - first.date).num_days();
    if total_days <= 0 {
        return None;
    }
    let growth = last.capital / initial_capital;
    if growth <= 0.0 {
        // Capital wiped out or negative; a compound growth rate has no
        // defined real value.
        return None;
    }
    Some(growth.powf(CALENDAR_DAYS_PER_YEAR / total_days as f64) - 1.0)
}

/// Largest fractional decline from the running peak, always <= 0.
fn compute_drawdown(points: &[EquityPoint]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;
    for point in points {
        if point.capital > peak {
            peak = point.capital;
        }
        if peak > 0.0 {
            let dd = point.capital / peak - 1.0;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}
