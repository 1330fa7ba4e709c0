//! PDF text backends.
//!
//! The extractor only needs the text of the first page with its horizontal
//! spacing intact; everything PDF-specific stays behind [`PdfBackend`].

use pdf_extract::Document;
use thiserror::Error;

use crate::layout::{GlyphCollector, layout_text};

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to read PDF: {0}")]
    OpenError(String),
    #[error("PDF has no pages with text")]
    NoPages,
}

pub trait PdfBackend {
    /// Text of the document's first page.
    fn first_page_text(&self, bytes: &[u8]) -> Result<String, BackendError>;
}

/// Backend built on the `pdf-extract` crate. Works on in-memory bytes, so
/// no temporary file is written. Page text is rebuilt from glyph positions
/// (see [`crate::layout`]) so column gaps survive.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractBackend;

impl PdfExtractBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for PdfExtractBackend {
    fn first_page_text(&self, bytes: &[u8]) -> Result<String, BackendError> {
        // pdf-extract panics on some malformed font tables instead of erroring.
        std::panic::catch_unwind(|| first_page_layout(bytes))
            .map_err(|_| BackendError::OpenError("parser panicked".to_string()))?
    }
}

/// Laid-out text of the first page that has any; leading blank pages are
/// skipped.
fn first_page_layout(bytes: &[u8]) -> Result<String, BackendError> {
    let mut doc = Document::load_mem(bytes).map_err(open_err)?;
    if doc.is_encrypted() {
        doc.decrypt("").map_err(open_err)?;
    }

    for page_num in doc.get_pages().into_keys() {
        let mut collector = GlyphCollector::new();
        pdf_extract::output_doc_page(&doc, &mut collector, page_num).map_err(open_err)?;
        let text = layout_text(&collector.into_glyphs());
        if !text.trim().is_empty() {
            tracing::debug!(page = page_num, "using first page with text");
            return Ok(text);
        }
    }
    Err(BackendError::NoPages)
}

fn open_err(e: impl std::fmt::Display) -> BackendError {
    BackendError::OpenError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_an_error() {
        let err = PdfExtractBackend::new()
            .first_page_text(b"definitely not a pdf")
            .unwrap_err();
        assert!(matches!(err, BackendError::OpenError(_)));
    }
}
