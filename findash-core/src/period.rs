//! Statement periods and the date a statement's balance is filed under.
//!
//! A statement for month M reports the balance as of the start of month M+1,
//! so the point is stored on the 1st of the following month (January of the
//! next year for a December statement).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("unknown month '{0}' (expected Jan..Dec)")]
    UnknownMonth(String),
    #[error("invalid year '{0}' (expected 4 digits)")]
    InvalidYear(String),
    #[error("date out of range for {0} {1}")]
    OutOfRange(Month, i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// 1-based month number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

impl FromStr for Month {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .into_iter()
            .find(|m| m.abbrev() == s)
            .ok_or_else(|| PeriodError::UnknownMonth(s.to_string()))
    }
}

/// The month and year a statement covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub month: Month,
    pub year: i32,
}

impl StatementPeriod {
    pub fn new(month: Month, year: i32) -> Self {
        Self { month, year }
    }

    /// Parse the caller's selection, e.g. `("Dec", "2023")`.
    pub fn parse(month: &str, year: &str) -> Result<Self, PeriodError> {
        let month: Month = month.parse()?;
        let year_str = year.trim();
        if year_str.len() != 4 || !year_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PeriodError::InvalidYear(year.to_string()));
        }
        let year: i32 = year_str
            .parse()
            .map_err(|_| PeriodError::InvalidYear(year.to_string()))?;
        Ok(Self { month, year })
    }

    /// First day of the month after the statement month.
    pub fn balance_date(&self) -> Result<NaiveDate, PeriodError> {
        let (year, month) = match self.month {
            Month::Dec => (self.year + 1, 1),
            m => (self.year, m.number() + 1),
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(PeriodError::OutOfRange(self.month, self.year))
    }
}

impl fmt::Display for StatementPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}
