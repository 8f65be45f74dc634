//! Plain-text performance report adapter.

use crate::domain::engine::BacktestResult;
use crate::domain::error::SigbenchError;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter;

impl TextReportAdapter {
    fn ratio(value: Option<f64>) -> String {
        match value {
            Some(v) => format!("{v:.2}"),
            None => "n/a".to_string(),
        }
    }
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        result: &BacktestResult,
        out: &mut dyn std::io::Write,
    ) -> Result<(), SigbenchError> {
        let metrics = &result.metrics;
        writeln!(out, "========== COMBINED STRATEGY PERFORMANCE ==========")?;
        writeln!(
            out,
            "Initial Capital: ${:.2}",
            result.equity_curve.initial_capital()
        )?;
        writeln!(out, "Final Capital:   ${:.2}", metrics.final_capital)?;
        writeln!(out, "Total Trades:    {}", metrics.total_trades)?;
        writeln!(out, "Sharpe Ratio:    {}", Self::ratio(metrics.sharpe))?;
        writeln!(out, "Sortino Ratio:   {}", Self::ratio(metrics.sortino))?;
        writeln!(out, "Calmar Ratio:    {}", Self::ratio(metrics.calmar))?;
        let cagr = match metrics.cagr {
            Some(c) => format!("{:.2}%", c * 100.0),
            None => "n/a".to_string(),
        };
        writeln!(out, "CAGR:            {cagr}")?;
        writeln!(out, "Max Drawdown:    {:.2}%", metrics.max_drawdown * 100.0)?;
        Ok(())
    }
}
