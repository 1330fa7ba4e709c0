//! CSV encoding of a series.
//!
//! Format: header `date,balance`, one row per point, ISO dates, plain decimal
//! balances (no currency symbol, no separators). Rows may appear in any
//! order on disk.

use chrono::{NaiveDate, NaiveDateTime};
use findash_core::{BalancePoint, Series};

use crate::error::StoreError;

pub fn encode(series: &Series) -> Result<String, StoreError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["date", "balance"])?;
    for p in series {
        wtr.write_record([p.date.format("%Y-%m-%d").to_string(), p.balance.to_string()])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| StoreError::Csv(e.into_error().into()))?;
    // csv only ever writes what we handed it, which was UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn decode(text: &str) -> Result<Series, StoreError> {
    if text.trim().is_empty() {
        return Ok(Series::new());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| StoreError::Malformed {
                line: 1,
                reason: format!("missing '{name}' column"),
            })
    };
    let date_col = column("date")?;
    let balance_col = column("balance")?;

    let mut points = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let malformed = |reason: String| StoreError::Malformed { line, reason };

        let date_str = record.get(date_col).unwrap_or("");
        let date = parse_date(date_str)
            .ok_or_else(|| malformed(format!("invalid date '{date_str}'")))?;

        let balance_str = record.get(balance_col).unwrap_or("");
        let balance = balance_str
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| malformed(format!("invalid balance '{balance_str}'")))?;

        points.push(BalancePoint::new(date, balance));
    }

    Ok(Series::from_points(points))
}

/// `YYYY-MM-DD`, or a midnight timestamp as older files carry.
fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|dt| dt.date())
    })
}
