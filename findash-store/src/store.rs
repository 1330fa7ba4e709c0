//! The series store: load once, upsert, persist after every change.
//!
//! The store holds no copy of the series itself; callers own the `Series`
//! value and hand it back to `persist`. Nothing guards the backing file
//! against a second writer, so two processes ingesting at once can lose an
//! update.

use chrono::NaiveDate;
use findash_core::Series;

use crate::backend::{FileBackend, StorageBackend};
use crate::codec;
use crate::error::StoreError;
use std::path::PathBuf;

#[derive(Debug)]
pub struct SeriesStore<B> {
    backend: B,
}

impl SeriesStore<FileBackend> {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(FileBackend::new(path))
    }
}

impl<B: StorageBackend> SeriesStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read the persisted series, or an empty one if nothing is stored.
    pub fn load(&self) -> Result<Series, StoreError> {
        let series = match self.backend.read()? {
            Some(text) => codec::decode(&text)?,
            None => Series::new(),
        };
        tracing::debug!(location = %self.backend.location(), points = series.len(), "loaded series");
        Ok(series)
    }

    /// Insert-or-replace `date`; the input series is left as it was.
    pub fn upsert(&self, series: &Series, date: NaiveDate, balance: f64) -> Series {
        series.upsert(date, balance)
    }

    /// Overwrite storage with the full series.
    pub fn persist(&self, series: &Series) -> Result<(), StoreError> {
        let text = codec::encode(series)?;
        self.backend.write(&text)?;
        tracing::info!(location = %self.backend.location(), points = series.len(), "persisted series");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn d(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn test_load_empty_backend() {
        let store = SeriesStore::new(MemoryBackend::new());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_then_persist() {
        let store = SeriesStore::new(MemoryBackend::new());
        let s = store.load().unwrap();
        let s = store.upsert(&s, d(2024, 7), 1500.0);
        store.persist(&s).unwrap();

        assert_eq!(
            store.backend().contents().as_deref(),
            Some("date,balance\n2024-07-01,1500\n")
        );
        assert_eq!(store.load().unwrap(), s);
    }

    #[test]
    fn test_persist_load_round_trip() {
        let store = SeriesStore::new(MemoryBackend::with_contents(
            "date,balance\n2024-05-01,20.75\n2024-02-01,11\n",
        ));
        let loaded = store.load().unwrap();
        store.persist(&loaded).unwrap();
        assert_eq!(store.load().unwrap(), loaded);
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let store = SeriesStore::new(MemoryBackend::with_contents("date,balance\n2024-13-01,5\n"));
        assert!(matches!(store.load(), Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn test_store_over_borrowed_backend() {
        let mem = MemoryBackend::new();
        let store = SeriesStore::new(&mem);
        store.persist(&Series::new().upsert(d(2024, 1), 1.0)).unwrap();
        assert!(mem.contents().unwrap().contains("2024-01-01,1"));
    }
}
