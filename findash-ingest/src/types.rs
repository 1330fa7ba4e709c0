use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A detected table: a rectangular grid of cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
    n_cols: usize,
}

impl Table {
    /// Build a table from rows of cells. Short rows are padded with empty
    /// cells so every row has the same width.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| r.into_iter().map(Into::into).collect())
            .collect();
        let n_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(n_cols, String::new());
        }
        Self { rows, n_cols }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn last_cell(&self, row: usize) -> Option<&str> {
        self.rows.get(row)?.last().map(String::as_str)
    }

    /// Index of the first row whose cell in `col` equals `label` exactly.
    pub fn find_row(&self, col: usize, label: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| r.get(col).map(String::as_str) == Some(label))
    }
}

/// A located and parsed balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub balance: f64,
    /// Name of the layout strategy that found the cell
    pub layout: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NoTableDetected,
    LabelNotFound,
    UnparseableValue,
}

/// Every way extraction can fail, collapsed to one of three kinds.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionFailure {
    #[error("no table detected: {0}")]
    NoTableDetected(String),
    #[error("balance not found (tried: {})", .tried.join(", "))]
    LabelNotFound { tried: Vec<String> },
    #[error("could not parse balance from '{text}'")]
    UnparseableValue { text: String },
}

impl ExtractionFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            ExtractionFailure::NoTableDetected(_) => FailureKind::NoTableDetected,
            ExtractionFailure::LabelNotFound { .. } => FailureKind::LabelNotFound,
            ExtractionFailure::UnparseableValue { .. } => FailureKind::UnparseableValue,
        }
    }
}

pub type ExtractionResult = Result<Extraction, ExtractionFailure>;
