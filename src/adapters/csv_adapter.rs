//! CSV bar file adapter.
//!
//! Row schema: `timestamp,open,high,low,close` with timestamps formatted as
//! `%Y-%m-%d %H:%M:%S`. Rows are sorted by timestamp before series
//! validation, so duplicate timestamps still surface as integrity errors.

use crate::domain::bar::Bar;
use crate::domain::error::SigbenchError;
use crate::domain::series::PriceSeries;
use crate::ports::data_port::BarSource;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct CsvBarSource {
    path: PathBuf,
}

impl CsvBarSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl BarSource for CsvBarSource {
    fn load(&self) -> Result<PriceSeries, SigbenchError> {
        let mut rdr = csv::Reader::from_path(&self.path).map_err(|e| SigbenchError::Data {
            reason: format!("failed to open {}: {}", self.path.display(), e),
        })?;

        let mut bars = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| SigbenchError::Data {
                reason: format!("CSV parse error at row {}: {}", row + 1, e),
            })?;

            let timestamp_str = field(&record, 0, "timestamp", row)?;
            let timestamp = NaiveDateTime::parse_from_str(&timestamp_str, TIMESTAMP_FORMAT)
                .map_err(|e| SigbenchError::Data {
                    reason: format!("invalid timestamp at row {}: {}", row + 1, e),
                })?;

            bars.push(Bar {
                timestamp,
                open: numeric_field(&record, 1, "open", row)?,
                high: numeric_field(&record, 2, "high", row)?,
                low: numeric_field(&record, 3, "low", row)?,
                close: numeric_field(&record, 4, "close", row)?,
            });
        }

        bars.sort_by_key(|b| b.timestamp);
        PriceSeries::new(bars)
    }
}

fn field(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    row: usize,
) -> Result<String, SigbenchError> {
    record
        .get(index)
        .map(|v| v.to_string())
        .ok_or_else(|| SigbenchError::Data {
            reason: format!("missing {} column at row {}", name, row + 1),
        })
}

fn numeric_field(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    row: usize,
) -> Result<f64, SigbenchError> {
    field(record, index, name, row)?
        .parse()
        .map_err(|e| SigbenchError::Data {
            reason: format!("invalid {} value at row {}: {}", name, row + 1, e),
        })
}

/// Write bars in the adapter's schema; output feeds straight back into
/// [`CsvBarSource`].
pub fn write_bars<P: AsRef<Path>>(path: P, bars: &[Bar]) -> Result<(), SigbenchError> {
    let mut wtr = csv::Writer::from_path(path.as_ref()).map_err(|e| SigbenchError::Data {
        reason: format!("failed to create {}: {}", path.as_ref().display(), e),
    })?;

    wtr.write_record(["timestamp", "open", "high", "low", "close"])
        .map_err(write_error)?;
    for bar in bars {
        wtr.write_record([
            bar.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
        ])
        .map_err(write_error)?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_error(e: csv::Error) -> SigbenchError {
    SigbenchError::Data {
        reason: format!("CSV write error: {}", e),
    }
}
