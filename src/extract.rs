//! File-kind detection and text extraction for uploaded files.
//!
//! The upload ingestor accepts bytes plus a declared content type and
//! filename; this module decides whether the file is supported and turns
//! PDF bytes into per-page text. PDF parsing itself is delegated to the
//! `pdf-extract` crate behind the [`PdfExtractor`] trait so the ingestor
//! can be tested with a fake extractor.

use thiserror::Error;

/// Supported MIME types for upload.
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_MARKDOWN: &str = "text/markdown";
pub const MIME_PDF: &str = "application/pdf";

/// The accepted file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Markdown,
    Pdf,
}

/// Decide the kind of an uploaded file from its declared MIME type,
/// falling back to the filename extension.
///
/// Returns `None` for anything outside the accepted set; the caller
/// rejects those uploads without touching any state.
pub fn detect_file_kind(content_type: &str, filename: &str) -> Option<FileKind> {
    match content_type {
        MIME_TEXT => return Some(FileKind::Text),
        MIME_MARKDOWN => return Some(FileKind::Markdown),
        MIME_PDF => return Some(FileKind::Pdf),
        _ => {}
    }
    let lower = filename.to_ascii_lowercase();
    if lower.ends_with(".txt") {
        Some(FileKind::Text)
    } else if lower.ends_with(".md") {
        Some(FileKind::Markdown)
    } else if lower.ends_with(".pdf") {
        Some(FileKind::Pdf)
    } else {
        None
    }
}

/// Extraction error. Aborts the single ingestion; never panics.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("file is not valid UTF-8 text")]
    Encoding,
}

/// Capability for turning PDF bytes into an ordered list of per-page
/// texts. Injected into the upload ingestor so it stays testable without
/// real PDF parsing.
pub trait PdfExtractor: Send + Sync {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError>;
}

/// Default extractor backed by the `pdf-extract` crate.
///
/// Each page's text is normalised to single-space-separated words; page
/// order is preserved.
pub struct DefaultPdfExtractor;

impl PdfExtractor for DefaultPdfExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| ExtractError::Pdf(e.to_string()))?;
        Ok(pages
            .iter()
            .map(|page| page.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect())
    }
}
