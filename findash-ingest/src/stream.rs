//! Stream table detection over extracted page text.
//!
//! There are no ruling lines to go on, so cells and columns are inferred
//! from whitespace alone:
//!
//! - a cell is a run of text where words are separated by at most one space;
//!   two or more spaces (or a tab) end the cell
//! - tables are blocks of lines separated by `min_blank_gap` blank lines that
//!   contain at least `min_table_rows` multi-cell lines
//! - the modal cell count among multi-cell lines is the column count; the
//!   character spans of cells in lines with that count are unioned per column
//!   and overlapping spans merged
//! - every cell lands in the span containing its midpoint, else the nearest
//!   one; cells sharing a column are joined with a space

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::types::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamSettings {
    /// Consecutive blank lines that end a table
    pub min_blank_gap: usize,
    /// Multi-cell lines a block needs to count as a table
    pub min_table_rows: usize,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            min_blank_gap: 3,
            min_table_rows: 2,
        }
    }
}

/// A cell as found on a line: text plus its character span `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
    text: String,
}

impl Span {
    fn mid2(&self) -> usize {
        self.start + self.end
    }
}

fn cell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\S+(?: \S+)*").expect("static regex"))
}

fn split_cells(line: &str) -> Vec<Span> {
    let line = line.replace('\t', "    ");
    cell_re()
        .find_iter(&line)
        .map(|m| {
            // Char offsets, not bytes, so accented text lines up.
            let start = line[..m.start()].chars().count();
            let text = m.as_str().to_string();
            let end = start + text.chars().count();
            Span { start, end, text }
        })
        .collect()
}

/// Detect all tables on a page, top to bottom.
pub fn detect_tables(page_text: &str, settings: &StreamSettings) -> Vec<Table> {
    blocks(page_text, settings.min_blank_gap.max(1))
        .into_iter()
        .filter_map(|block| grid(&block, settings.min_table_rows.max(1)))
        .collect()
}

/// Split page lines into blocks of non-blank lines.
fn blocks(page_text: &str, min_blank_gap: usize) -> Vec<Vec<Vec<Span>>> {
    let mut out = Vec::new();
    let mut current: Vec<Vec<Span>> = Vec::new();
    let mut blank_run = 0;

    for line in page_text.lines() {
        let cells = split_cells(line);
        if cells.is_empty() {
            blank_run += 1;
            if blank_run >= min_blank_gap && !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            continue;
        }
        blank_run = 0;
        current.push(cells);
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn grid(lines: &[Vec<Span>], min_table_rows: usize) -> Option<Table> {
    let multi: Vec<&Vec<Span>> = lines.iter().filter(|l| l.len() > 1).collect();
    if multi.len() < min_table_rows {
        return None;
    }

    let n_cols = modal_count(&multi);
    let columns = column_spans(&multi, n_cols);

    let rows = lines.iter().map(|line| {
        let mut row = vec![String::new(); columns.len()];
        for cell in line {
            let col = assign(&columns, cell);
            if row[col].is_empty() {
                row[col] = cell.text.clone();
            } else {
                row[col].push(' ');
                row[col].push_str(&cell.text);
            }
        }
        row
    });

    Some(Table::from_rows(rows))
}

/// Most common cell count; ties go to the wider layout.
fn modal_count(lines: &[&Vec<Span>]) -> usize {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for l in lines {
        *counts.entry(l.len()).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by_key(|&(width, freq)| (freq, width))
        .map(|(width, _)| width)
        .unwrap_or(0)
}

fn column_spans(lines: &[&Vec<Span>], n_cols: usize) -> Vec<(usize, usize)> {
    let mut spans: Vec<(usize, usize)> = vec![(usize::MAX, 0); n_cols];
    for line in lines.iter().filter(|l| l.len() == n_cols) {
        for (i, cell) in line.iter().enumerate() {
            spans[i].0 = spans[i].0.min(cell.start);
            spans[i].1 = spans[i].1.max(cell.end);
        }
    }

    spans.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start < last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

fn assign(columns: &[(usize, usize)], cell: &Span) -> usize {
    // Compare doubled coordinates to keep midpoints integral.
    let mid2 = cell.mid2();
    if let Some(i) = columns
        .iter()
        .position(|&(s, e)| 2 * s <= mid2 && mid2 < 2 * e)
    {
        return i;
    }
    columns
        .iter()
        .enumerate()
        .min_by_key(|&(_, &(s, e))| {
            if mid2 < 2 * s {
                2 * s - mid2
            } else {
                mid2 + 1 - 2 * e
            }
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}
