use findash_ingest::{BalanceExtractor, PdfBackend, PdfExtractBackend, detect_tables};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// One-page statement with every cell placed absolutely in Helvetica 10pt:
/// a title, then a 3-row, 6-column account summary with right-aligned amounts.
fn one_account_pdf() -> Vec<u8> {
    std::fs::read(fixture_path("one_account.pdf")).expect("fixture present")
}

#[test]
fn test_page_text_keeps_column_gaps() {
    let text = PdfExtractBackend::new()
        .first_page_text(&one_account_pdf())
        .unwrap();
    let row = text
        .lines()
        .find(|l| l.contains("One Account"))
        .expect("account row");
    assert!(row.contains("One Account  "), "columns collapsed: {row:?}");
    assert!(!row.contains("SGD 1,000.00"), "columns collapsed: {row:?}");
}

#[test]
fn test_detects_summary_table() {
    let text = PdfExtractBackend::new()
        .first_page_text(&one_account_pdf())
        .unwrap();
    let tables = detect_tables(&text, &Default::default());
    assert_eq!(tables.len(), 1);

    let t = &tables[0];
    assert_eq!(t.n_cols(), 6);
    assert_eq!(t.n_rows(), 3);
    assert_eq!(t.cell(0, 5), Some("Balance"));
    assert_eq!(t.cell(1, 0), Some("One Account"));
    assert_eq!(t.cell(2, 3), Some("50.00"));
}

#[test]
fn test_extract_one_account_balance() {
    let got = BalanceExtractor::new(PdfExtractBackend::new())
        .extract(&one_account_pdf())
        .unwrap();
    assert_eq!(got.balance, 1200.0);
    assert_eq!(got.layout, "one-account");
}
