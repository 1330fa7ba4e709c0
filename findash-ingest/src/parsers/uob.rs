//! UOB account statement layouts
//!
//! Three layouts are known, newest first:
//!   - current: the balance is the last cell of the 14th table row
//!   - Sep 2024: a row labelled "One Account", balance in column 5
//!   - before Jul 2024: a row labelled "UNIPLUS", balance in column 5

use crate::strategy::BalanceStrategy;

pub const UOB_LAYOUTS: [BalanceStrategy; 3] = [
    BalanceStrategy::FixedPosition {
        name: "fixed-position",
        row: 13,
    },
    BalanceStrategy::LabelledRow {
        name: "one-account",
        label: "One Account",
        column: 5,
    },
    BalanceStrategy::LabelledRow {
        name: "uniplus",
        label: "UNIPLUS",
        column: 5,
    },
];
