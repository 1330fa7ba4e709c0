use chrono::NaiveDate;
use findash_core::{Series, StatementPeriod};
use findash_store::{SeriesStore, StoreError};
use std::fs;

fn d(y: i32, m: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, 1).unwrap()
}

#[test]
fn test_missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = SeriesStore::open(dir.path().join("balance_data.csv"));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_monthly_ingest_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("balance_data.csv");
    let store = SeriesStore::open(&path);

    let mut series = store.load().unwrap();
    for (month, year, balance) in [("Jun", "2024", 10_250.40), ("Dec", "2023", 9_800.0), ("Jun", "2024", 10_300.0)] {
        let date = StatementPeriod::parse(month, year).unwrap().balance_date().unwrap();
        series = store.upsert(&series, date, balance);
        store.persist(&series).unwrap();
    }

    assert_eq!(series.len(), 2);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "date,balance\n2024-01-01,9800\n2024-07-01,10300\n"
    );
    assert!(!path.with_extension("csv.tmp").exists());

    let reopened = SeriesStore::open(&path).load().unwrap();
    assert_eq!(reopened, series);
}

#[test]
fn test_reads_file_written_by_older_tool() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("balance_data.csv");
    fs::write(
        &path,
        "date,balance\n2024-08-01,15000.5\n2024-07-01 00:00:00,14000.0\n",
    )
    .unwrap();

    let series = SeriesStore::open(&path).load().unwrap();
    let expected = Series::new().upsert(d(2024, 7), 14000.0).upsert(d(2024, 8), 15000.5);
    assert_eq!(series, expected);
}

#[test]
fn test_corrupt_file_surfaces_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("balance_data.csv");
    fs::write(&path, "date,balance\nyesterday,1\n").unwrap();

    let err = SeriesStore::open(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::Malformed { line: 2, .. }), "{err}");
}

#[test]
fn test_write_into_unwritable_location_fails() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the parent directory should be.
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "x").unwrap();

    let store = SeriesStore::open(blocker.join("balance_data.csv"));
    let err = store.persist(&Series::new()).unwrap_err();
    assert!(matches!(err, StoreError::Write { .. }), "{err}");
}
