//! Equity curve derivation and daily resampling.

use chrono::{NaiveDate, NaiveDateTime};

use super::trade::TradeBook;

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub timestamp: NaiveDateTime,
    pub capital: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub capital: f64,
}

/// Cumulative capital over time: one initial point at the run's start plus
/// one point per trade exit.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityCurve {
    points: Vec<EquityPoint>,
    initial_capital: f64,
}

impl EquityCurve {
    pub fn from_trades(start: NaiveDateTime, initial_capital: f64, book: &TradeBook) -> Self {
        let mut points = Vec::with_capacity(book.len() + 1);
        points.push(EquityPoint {
            timestamp: start,
            capital: initial_capital,
        });
        let mut capital = initial_capital;
        for trade in book.trades() {
            capital += trade.pnl;
            points.push(EquityPoint {
                timestamp: trade.exit_time,
                capital,
            });
        }
        EquityCurve {
            points,
            initial_capital,
        }
    }

    pub fn points(&self) -> &[EquityPoint] {
        &self.points
    }

    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    pub fn final_capital(&self) -> f64 {
        self.points[self.points.len() - 1].capital
    }

    /// Capital as of `t`: the last point at or before `t`, or the initial
    /// capital when `t` precedes the curve.
    pub fn capital_at(&self, t: NaiveDateTime) -> f64 {
        self.points
            .iter()
            .take_while(|p| p.timestamp <= t)
            .last()
            .map(|p| p.capital)
            .unwrap_or(self.initial_capital)
    }

    /// Project the curve onto a calendar-day grid with last-observation
    /// carry-forward.
    ///
    /// The grid runs from the date of the first trade exit to the date of the
    /// last point; days before the first trade are excluded rather than
    /// back-filled with the initial capital. A day's value is the capital at
    /// that day's last exit. A curve with no trades projects to nothing.
    pub fn resample_daily(&self) -> Vec<DailyPoint> {
        if self.points.len() < 2 {
            return Vec::new();
        }

        let first = self.points[1].timestamp.date();
        let last = self.points[self.points.len() - 1].timestamp.date();

        let mut daily = Vec::new();
        let mut idx = 0;
        let mut current = self.points[0].capital;
        let mut date = first;
        loop {
            while idx < self.points.len() && self.points[idx].timestamp.date() <= date {
                current = self.points[idx].capital;
                idx += 1;
            }
            daily.push(DailyPoint {
                date,
                capital: current,
            });
            if date >= last {
                break;
            }
            date += chrono::Duration::days(1);
        }
        daily
    }
}
