//! Balance points and the ordered series they live in.
//!
//! A `Series` is always sorted ascending by date and never holds two points
//! for the same date. The only way to change one is `upsert`, which hands
//! back a new series and leaves its input untouched.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One month's balance, dated to the 1st of the month it reports on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: f64,
}

impl BalancePoint {
    /// Create a point, normalizing the day-of-month to the 1st.
    pub fn new(date: NaiveDate, balance: f64) -> Self {
        Self {
            date: first_of_month(date),
            balance,
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    points: Vec<BalancePoint>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from points in any order.
    ///
    /// When several points share a date the one appearing last wins, the same
    /// outcome as upserting them one by one.
    pub fn from_points(points: impl IntoIterator<Item = BalancePoint>) -> Self {
        points
            .into_iter()
            .fold(Self::new(), |series, p| series.upsert(p.date, p.balance))
    }

    /// Insert-or-replace the balance for `date`.
    pub fn upsert(&self, date: NaiveDate, balance: f64) -> Series {
        let point = BalancePoint::new(date, balance);
        let mut points: Vec<BalancePoint> = self
            .points
            .iter()
            .filter(|p| p.date != point.date)
            .copied()
            .collect();
        points.push(point);
        points.sort_by_key(|p| p.date);
        Series { points }
    }

    pub fn points(&self) -> &[BalancePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].balance)
    }

    pub fn latest(&self) -> Option<&BalancePoint> {
        self.points.last()
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a BalancePoint;
    type IntoIter = std::slice::Iter<'a, BalancePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
