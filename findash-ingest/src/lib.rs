//! findash-ingest: statement PDF → balance, via stream table detection and
//! bank-specific layout strategies.

pub mod backend;
pub mod extractor;
pub mod layout;
pub mod parsers;
pub mod strategy;
pub mod stream;
pub mod types;

pub use backend::{BackendError, PdfBackend, PdfExtractBackend};
pub use extractor::{BalanceExtractor, extract_from_table, parse_balance};
pub use strategy::BalanceStrategy;
pub use stream::{StreamSettings, detect_tables};
pub use types::{Extraction, ExtractionFailure, ExtractionResult, FailureKind, Table};
