//! Balance extraction: PDF bytes → first-page table → balance.

use crate::backend::{PdfBackend, PdfExtractBackend};
use crate::parsers::UOB_LAYOUTS;
use crate::strategy::{BalanceStrategy, locate_first};
use crate::stream::{StreamSettings, detect_tables};
use crate::types::{Extraction, ExtractionFailure, ExtractionResult, Table};

pub struct BalanceExtractor<B = PdfExtractBackend> {
    backend: B,
    settings: StreamSettings,
    strategies: Vec<BalanceStrategy>,
}

impl<B: PdfBackend> BalanceExtractor<B> {
    /// Extractor over `backend` using the UOB layouts and default detection
    /// settings.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            settings: StreamSettings::default(),
            strategies: UOB_LAYOUTS.to_vec(),
        }
    }

    pub fn with_settings(mut self, settings: StreamSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_strategies(mut self, strategies: impl Into<Vec<BalanceStrategy>>) -> Self {
        self.strategies = strategies.into();
        self
    }

    /// Extract the balance from a statement's raw bytes.
    ///
    /// Never panics and never returns a partial result: any problem becomes
    /// an [`ExtractionFailure`].
    pub fn extract(&self, bytes: &[u8]) -> ExtractionResult {
        let page = self
            .backend
            .first_page_text(bytes)
            .map_err(|e| ExtractionFailure::NoTableDetected(e.to_string()))?;

        let table = detect_tables(&page, &self.settings)
            .into_iter()
            .next()
            .ok_or_else(|| {
                ExtractionFailure::NoTableDetected("first page has no tabular text".to_string())
            })?;
        tracing::debug!(rows = table.n_rows(), cols = table.n_cols(), "detected table");

        let result = extract_from_table(&table, &self.strategies);
        match &result {
            Ok(found) => tracing::info!(balance = found.balance, layout = %found.layout, "extracted balance"),
            Err(e) => tracing::warn!(kind = ?e.kind(), reason = %e, "extraction failed"),
        }
        result
    }
}

/// Locate and parse the balance in an already-detected table.
pub fn extract_from_table(table: &Table, strategies: &[BalanceStrategy]) -> ExtractionResult {
    let (strategy, text) =
        locate_first(strategies, table).ok_or_else(|| ExtractionFailure::LabelNotFound {
            tried: strategies.iter().map(|s| s.name().to_string()).collect(),
        })?;

    let balance = parse_balance(text).ok_or_else(|| ExtractionFailure::UnparseableValue {
        text: text.to_string(),
    })?;

    Ok(Extraction {
        balance,
        layout: strategy.name().to_string(),
    })
}

/// Parse a statement amount such as `"12,345.67"`.
pub fn parse_balance(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use crate::types::FailureKind;

    struct CannedPage(&'static str);

    impl PdfBackend for CannedPage {
        fn first_page_text(&self, _bytes: &[u8]) -> Result<String, BackendError> {
            Ok(self.0.to_string())
        }
    }

    struct Unreadable;

    impl PdfBackend for Unreadable {
        fn first_page_text(&self, _bytes: &[u8]) -> Result<String, BackendError> {
            Err(BackendError::OpenError("bad xref".to_string()))
        }
    }

    const STATEMENT_SEP_2024: &str = "\
Statement of Account
Account Type       Account No     Currency    Opening     Deposits    Balance
One Account        123-456-789    SGD         1,000.00    200.00      1,200.00
Stash Account      987-654-321    SGD         50.00       0.00        50.00
";

    #[test]
    fn test_parse_balance() {
        assert_eq!(parse_balance("1,234.56"), Some(1234.56));
        assert_eq!(parse_balance(" 42 "), Some(42.0));
        assert_eq!(parse_balance("1,000,000"), Some(1_000_000.0));
        assert_eq!(parse_balance("abc"), None);
        assert_eq!(parse_balance(""), None);
        assert_eq!(parse_balance("NaN"), None);
    }

    #[test]
    fn test_extract_from_page_text() {
        let ex = BalanceExtractor::new(CannedPage(STATEMENT_SEP_2024));
        let got = ex.extract(b"%PDF").unwrap();
        assert_eq!(got.balance, 1200.0);
        assert_eq!(got.layout, "one-account");
    }

    #[test]
    fn test_backend_error_is_no_table() {
        let err = BalanceExtractor::new(Unreadable).extract(b"").unwrap_err();
        assert_eq!(err.kind(), FailureKind::NoTableDetected);
        assert!(err.to_string().contains("bad xref"));
    }

    #[test]
    fn test_page_without_table() {
        let ex = BalanceExtractor::new(CannedPage("Nothing to see here.\n"));
        let err = ex.extract(b"").unwrap_err();
        assert_eq!(err.kind(), FailureKind::NoTableDetected);
    }

    #[test]
    fn test_unparseable_balance() {
        let ex = BalanceExtractor::new(CannedPage(
            "Type         A    B    C    D    Balance\nOne Account  1    2    3    4    abc\n",
        ));
        let err = ex.extract(b"").unwrap_err();
        assert_eq!(err, ExtractionFailure::UnparseableValue { text: "abc".into() });
    }

    #[test]
    fn test_custom_strategies() {
        let ex = BalanceExtractor::new(CannedPage(STATEMENT_SEP_2024)).with_strategies(vec![
            BalanceStrategy::LabelledRow {
                name: "stash",
                label: "Stash Account",
                column: 5,
            },
        ]);
        let got = ex.extract(b"").unwrap();
        assert_eq!(got.balance, 50.0);
        assert_eq!(got.layout, "stash");
    }
}
