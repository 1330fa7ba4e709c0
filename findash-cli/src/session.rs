//! Dashboard session: the upload → pick month/year → submit flow.
//!
//! Owns the in-memory series and the store handle. A failed submit never
//! changes the series; the caller always gets a chart of the last-good state
//! plus, on failure, one short message to show the user.

use findash_core::{BalancePoint, ChartData, ChartOptions, Series, StatementPeriod, project};
use findash_ingest::{BalanceExtractor, PdfBackend};
use findash_store::{SeriesStore, StorageBackend, StoreError};

pub const UPLOAD_RECEIVED: &str = "PDF file received! Select month and year, then click Upload.";
pub const NO_FILE: &str = "Please select a PDF file";
pub const NO_PERIOD: &str = "Please select both month and year";
pub const EXTRACTION_FAILED: &str = "Error processing PDF. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub chart: ChartData,
    pub error: Option<String>,
    /// The point written on success
    pub stored: Option<BalancePoint>,
}

pub struct Dashboard<P, S> {
    extractor: BalanceExtractor<P>,
    store: SeriesStore<S>,
    chart_opts: ChartOptions,
    series: Series,
    pending: Option<Vec<u8>>,
}

impl<P: PdfBackend, S: StorageBackend> Dashboard<P, S> {
    /// Load the persisted series. A store that can't be read is fatal.
    pub fn open(
        extractor: BalanceExtractor<P>,
        store: SeriesStore<S>,
        chart_opts: ChartOptions,
    ) -> Result<Self, StoreError> {
        let series = store.load()?;
        Ok(Self {
            extractor,
            store,
            chart_opts,
            series,
            pending: None,
        })
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn chart(&self) -> ChartData {
        project(&self.series, &self.chart_opts)
    }

    /// Hold a statement until the next submit.
    pub fn receive_upload(&mut self, bytes: Vec<u8>) -> &'static str {
        self.pending = Some(bytes);
        UPLOAD_RECEIVED
    }

    pub fn submit(&mut self, month: Option<&str>, year: Option<&str>) -> SubmitOutcome {
        match self.try_submit(month, year) {
            Ok(point) => SubmitOutcome {
                chart: self.chart(),
                error: None,
                stored: Some(point),
            },
            Err(msg) => SubmitOutcome {
                chart: self.chart(),
                error: Some(msg),
                stored: None,
            },
        }
    }

    fn try_submit(&mut self, month: Option<&str>, year: Option<&str>) -> Result<BalancePoint, String> {
        let bytes = self.pending.as_deref().ok_or(NO_FILE)?;

        let non_empty = |s: &&str| !s.trim().is_empty();
        let (Some(month), Some(year)) = (month.filter(non_empty), year.filter(non_empty)) else {
            return Err(NO_PERIOD.to_string());
        };

        let date = StatementPeriod::parse(month, year)
            .and_then(|p| p.balance_date())
            .map_err(|e| format!("Error: {e}"))?;

        let found = self.extractor.extract(bytes).map_err(|e| {
            tracing::warn!(kind = ?e.kind(), reason = %e, "statement rejected");
            EXTRACTION_FAILED.to_string()
        })?;

        let next = self.store.upsert(&self.series, date, found.balance);
        self.store.persist(&next).map_err(|e| format!("Error: {e}"))?;
        self.series = next;

        Ok(BalancePoint::new(date, found.balance))
    }
}
