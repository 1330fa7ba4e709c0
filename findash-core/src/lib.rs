//! findash-core: balance points, the date-keyed series, and chart projection

pub mod balance;
pub mod chart;
pub mod period;

pub use balance::{BalancePoint, Series};
pub use chart::{ChartData, ChartOptions, format_currency, project};
pub use period::{Month, PeriodError, StatementPeriod};
