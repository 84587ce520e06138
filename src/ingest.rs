//! Content ingestors: manual text, Q&A pairs, and file uploads.
//!
//! Each ingestor validates its input and produces one provenance-labelled
//! fragment string for the knowledge store, or a typed rejection. Rejected
//! input never reaches the store. File uploads accept plain text, markdown,
//! and PDF; PDF parsing is delegated to an injected [`PdfExtractor`].

use thiserror::Error;

use crate::extract::{detect_file_kind, ExtractError, FileKind, PdfExtractor};

/// Why an ingestion was refused.
///
/// `Validation` covers local input problems (blank text, unsupported file
/// type) and is surfaced as an inline notice. `Extraction` covers file
/// decode or PDF parse failures; the partial result is discarded and the
/// knowledge base stays unchanged.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{0}")]
    Validation(String),
    #[error("failed to process file: {0}")]
    Extraction(#[from] ExtractError),
}

/// Build a fragment from manually entered free text.
///
/// Rejects input that is blank after trimming.
pub fn manual_fragment(text: &str) -> Result<String, IngestError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(IngestError::Validation(
            "text must not be blank".to_string(),
        ));
    }
    Ok(format!("manually added text:\n{text}"))
}

/// Build a fragment from a question/answer pair.
///
/// Both sides must be non-blank after trimming.
pub fn qa_fragment(question: &str, answer: &str) -> Result<String, IngestError> {
    let question = question.trim();
    let answer = answer.trim();
    if question.is_empty() || answer.is_empty() {
        return Err(IngestError::Validation(
            "question and answer must both be non-blank".to_string(),
        ));
    }
    Ok(format!("---\nquestion: {question}\nanswer: {answer}\n---"))
}

/// Build a fragment from an uploaded file.
///
/// The declared MIME type is checked first, then the filename extension.
/// Plain text and markdown are decoded as UTF-8; PDFs go through the
/// injected `extractor`, and the per-page texts are joined with blank
/// lines in page order. Any failure discards the upload whole.
pub fn file_fragment(
    extractor: &dyn PdfExtractor,
    bytes: &[u8],
    content_type: &str,
    filename: &str,
) -> Result<String, IngestError> {
    let kind = detect_file_kind(content_type, filename).ok_or_else(|| {
        IngestError::Validation(format!(
            "unsupported file type: {filename} (supported: .txt, .md, .pdf)"
        ))
    })?;

    let body = match kind {
        FileKind::Text | FileKind::Markdown => std::str::from_utf8(bytes)
            .map_err(|_| ExtractError::Encoding)?
            .to_string(),
        FileKind::Pdf => extractor.extract_pages(bytes)?.join("\n\n"),
    };

    Ok(format!("content from file ({filename}):\n{body}"))
}
