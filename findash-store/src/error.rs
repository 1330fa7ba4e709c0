use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The file exists but its contents can't be trusted.
    #[error("malformed balance file at line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
