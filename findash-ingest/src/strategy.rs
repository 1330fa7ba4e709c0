//! Named rules for finding the balance cell in a detected table.
//!
//! Statement layouts drift over time, so a bank is described by an ordered
//! list of strategies; the first one that finds a non-empty cell wins.

use crate::types::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStrategy {
    /// Last column of a fixed (zero-based) row.
    FixedPosition { name: &'static str, row: usize },
    /// Row whose first column equals `label` exactly; read `column`.
    LabelledRow {
        name: &'static str,
        label: &'static str,
        column: usize,
    },
}

impl BalanceStrategy {
    pub fn name(&self) -> &'static str {
        match *self {
            BalanceStrategy::FixedPosition { name, .. } => name,
            BalanceStrategy::LabelledRow { name, .. } => name,
        }
    }

    /// Text of the located cell, or `None` if this layout doesn't apply.
    pub fn locate<'t>(&self, table: &'t Table) -> Option<&'t str> {
        let text = match *self {
            BalanceStrategy::FixedPosition { row, .. } => table.last_cell(row)?,
            BalanceStrategy::LabelledRow { label, column, .. } => {
                let row = table.find_row(0, label)?;
                table.cell(row, column)?
            }
        };
        let text = text.trim();
        if text.is_empty() { None } else { Some(text) }
    }
}

/// Run strategies in order; returns the winning strategy and its cell text.
pub fn locate_first<'t>(
    strategies: &[BalanceStrategy],
    table: &'t Table,
) -> Option<(BalanceStrategy, &'t str)> {
    strategies.iter().find_map(|s| match s.locate(table) {
        Some(text) => Some((*s, text)),
        None => {
            tracing::debug!(strategy = s.name(), "layout did not match");
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAST: BalanceStrategy = BalanceStrategy::FixedPosition { name: "fixed", row: 1 };
    const LABEL: BalanceStrategy = BalanceStrategy::LabelledRow {
        name: "label",
        label: "Total",
        column: 2,
    };

    #[test]
    fn test_fixed_position_reads_last_column() {
        let t = Table::from_rows(vec![vec!["h1", "h2", "h3"], vec!["a", "b", " 42.00 "]]);
        assert_eq!(LAST.locate(&t), Some("42.00"));
    }

    #[test]
    fn test_fixed_position_missing_row_or_blank_cell() {
        let short = Table::from_rows(vec![vec!["only", "row"]]);
        assert_eq!(LAST.locate(&short), None);

        let blank = Table::from_rows(vec![vec!["h1", "h2"], vec!["a", "  "]]);
        assert_eq!(LAST.locate(&blank), None);
    }

    #[test]
    fn test_labelled_row() {
        let t = Table::from_rows(vec![vec!["Item", "", "Amount"], vec!["Total", "", "9.99"]]);
        assert_eq!(LABEL.locate(&t), Some("9.99"));

        let narrow = Table::from_rows(vec![vec!["Total", "9.99"]]);
        assert_eq!(LABEL.locate(&narrow), None);
    }

    #[test]
    fn test_locate_first_respects_order() {
        let t = Table::from_rows(vec![vec!["Total", "", "1.00"]]);
        let (won, text) = locate_first(&[LAST, LABEL], &t).unwrap();
        assert_eq!(won.name(), "label");
        assert_eq!(text, "1.00");
        assert!(locate_first(&[LAST], &t).is_none());
    }
}
