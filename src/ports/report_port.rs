//! Report output port trait.

use crate::domain::engine::BacktestResult;
use crate::domain::error::SigbenchError;

/// Port for rendering a backtest result to a writer.
pub trait ReportPort {
    fn write(
        &self,
        result: &BacktestResult,
        out: &mut dyn std::io::Write,
    ) -> Result<(), SigbenchError>;
}
