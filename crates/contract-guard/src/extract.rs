//! Contract text sources.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use crate::errors::ExtractionError;

/// Supplies the plain text of a contract document.
#[cfg_attr(test, mockall::automock)]
pub trait TextSource: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Like [`TextSource::extract`], but a failure becomes a diagnostic string.
pub fn extract_or_diagnostic(source: &dyn TextSource, path: &Path) -> String {
    match source.extract(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "text extraction failed");
            e.diagnostic()
        }
    }
}

/// Extracts text page by page with lopdf.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextSource;

impl TextSource for PdfTextSource {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        if !path.exists() {
            return Err(ExtractionError::NotFound(path.to_path_buf()));
        }
        let doc = Document::load(path)?;

        let mut text = String::new();
        for page_number in doc.get_pages().keys() {
            text.push_str(&doc.extract_text(&[*page_number])?);
            text.push('\n');
        }
        debug!(path = %path.display(), chars = text.len(), "extracted pdf text");
        Ok(text)
    }
}

/// Reads UTF-8 text files as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        if !path.exists() {
            return Err(ExtractionError::NotFound(path.to_path_buf()));
        }
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Pick a source by file extension: `.txt` and `.md` are read as text,
/// everything else as PDF.
pub fn source_for_path(path: &Path) -> Box<dyn TextSource> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("txt") | Some("md") => Box::new(PlainTextSource),
        _ => Box::new(PdfTextSource),
    }
}
