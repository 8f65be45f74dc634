//! Validated, immutable price series.

use super::bar::Bar;
use super::error::SigbenchError;

/// Time-ordered OHLC bar series.
///
/// Construction enforces the series invariants: strictly increasing
/// timestamps, `high >= max(open, close)` and `low <= min(open, close)`.
/// Violations are reported with the offending bar index. Once built, the
/// series is read-only; rules only ever see `&PriceSeries`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<Bar>) -> Result<Self, SigbenchError> {
        for (index, bar) in bars.iter().enumerate() {
            if bar.high < bar.open.max(bar.close) {
                return Err(SigbenchError::DataIntegrity {
                    index,
                    reason: format!(
                        "high {} below max(open, close) {}",
                        bar.high,
                        bar.open.max(bar.close)
                    ),
                });
            }
            if bar.low > bar.open.min(bar.close) {
                return Err(SigbenchError::DataIntegrity {
                    index,
                    reason: format!(
                        "low {} above min(open, close) {}",
                        bar.low,
                        bar.open.min(bar.close)
                    ),
                });
            }
            if index > 0 && bar.timestamp <= bars[index - 1].timestamp {
                return Err(SigbenchError::DataIntegrity {
                    index,
                    reason: format!(
                        "timestamp {} not strictly after {}",
                        bar.timestamp,
                        bars[index - 1].timestamp
                    ),
                });
            }
        }
        Ok(PriceSeries { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }
}
