//! Chart projection: turn a series into what a line chart needs.
//!
//! The core produces the data; rendering is somebody else's job.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::balance::Series;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub title: String,
    pub y_label: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Bank Balance Over Time".to_string(),
            y_label: "Balance (SGD)".to_string(),
        }
    }
}

/// Render instructions for one line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub title: String,
    pub y_label: String,
    /// Point dates, ascending
    pub x: Vec<NaiveDate>,
    /// Axis tick text per point ("Jan 2024")
    pub tick_text: Vec<String>,
    pub y: Vec<f64>,
    /// Label drawn above each point ("$1,234.50")
    pub labels: Vec<String>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

pub fn project(series: &Series, opts: &ChartOptions) -> ChartData {
    let mut chart = ChartData {
        title: opts.title.clone(),
        y_label: opts.y_label.clone(),
        x: Vec::with_capacity(series.len()),
        tick_text: Vec::with_capacity(series.len()),
        y: Vec::with_capacity(series.len()),
        labels: Vec::with_capacity(series.len()),
    };

    for p in series {
        chart.x.push(p.date);
        chart.tick_text.push(p.date.format("%b %Y").to_string());
        chart.y.push(p.balance);
        chart.labels.push(format_currency(p.balance));
    }

    chart
}

/// Format as `$#,##0.00`. Negative amounts keep the sign after the symbol
/// (`$-1,234.50`).
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("${sign}{grouped}.{frac_part}")
}
