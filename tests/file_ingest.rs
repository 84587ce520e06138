//! Integration tests for file ingestion into the knowledge base.
//!
//! Covers the accepted upload kinds end-to-end, including real PDF
//! extraction against handcrafted minimal PDF bytes, and proves rejected
//! uploads leave the knowledge base untouched.

use std::io::Write;
use tempfile::NamedTempFile;

use kb_chat::extract::{DefaultPdfExtractor, MIME_PDF};
use kb_chat::ingest::{file_fragment, manual_fragment, qa_fragment, IngestError};
use kb_chat::knowledge::KnowledgeBase;

/// Minimal valid single-page PDF containing `phrase`, with a correct xref
/// table so `pdf-extract` can parse it without a real PDF producer.
fn minimal_pdf(phrase: &str) -> Vec<u8> {
    let stream = format!("BT /F1 12 Tf 72 720 Td ({phrase}) Tj ET\n");
    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");
    let o1 = out.len();
    out.extend_from_slice(b"1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n");
    let o2 = out.len();
    out.extend_from_slice(b"2 0 obj << /Type /Pages /Kids [3 0 R] /Count 1 >> endobj\n");
    let o3 = out.len();
    out.extend_from_slice(b"3 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >> endobj\n");
    let o4 = out.len();
    out.extend_from_slice(
        format!(
            "4 0 obj << /Length {} >> stream\n{}endstream endobj\n",
            stream.len(),
            stream
        )
        .as_bytes(),
    );
    let o5 = out.len();
    out.extend_from_slice(
        b"5 0 obj << /Type /Font /Subtype /Type1 /BaseFont /Helvetica >> endobj\n",
    );
    let xref_start = out.len();
    out.extend_from_slice(b"xref\n0 6\n");
    out.extend_from_slice(format!("{:010} 65535 f \n", 0).as_bytes());
    for offset in [o1, o2, o3, o4, o5] {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(b"trailer << /Size 6 /Root 1 0 R >>\nstartxref\n");
    out.extend_from_slice(format!("{xref_start}\n").as_bytes());
    out.extend_from_slice(b"%%EOF\n");
    out
}

#[test]
fn pdf_upload_is_extracted_and_labelled() {
    let pdf = minimal_pdf("thirty day return policy");
    let fragment = file_fragment(&DefaultPdfExtractor, &pdf, MIME_PDF, "policy.pdf").unwrap();

    assert!(fragment.starts_with("content from file (policy.pdf):\n"));
    assert!(fragment.contains("thirty day return policy"));
}

#[test]
fn markdown_file_from_disk_is_ingested_by_extension() {
    let mut file = NamedTempFile::with_suffix(".md").unwrap();
    write!(file, "# Shipping\n\nOrders leave within 48 hours.").unwrap();

    let bytes = std::fs::read(file.path()).unwrap();
    let fragment = file_fragment(&DefaultPdfExtractor, &bytes, "", "shipping.md").unwrap();

    assert_eq!(
        fragment,
        "content from file (shipping.md):\n# Shipping\n\nOrders leave within 48 hours."
    );
}

#[test]
fn corrupt_pdf_leaves_the_knowledge_base_unchanged() {
    let mut kb = KnowledgeBase::new();
    kb.append("manually added text:\nexisting entry");
    let before = kb.as_text().to_string();

    let result = file_fragment(&DefaultPdfExtractor, b"%PDF-1.4 truncated", MIME_PDF, "bad.pdf");
    assert!(matches!(result, Err(IngestError::Extraction(_))));
    assert_eq!(kb.as_text(), before);
}

#[test]
fn zip_upload_is_rejected_without_state_change() {
    let mut kb = KnowledgeBase::new();
    let result = file_fragment(
        &DefaultPdfExtractor,
        b"PK\x03\x04archive bytes",
        "application/zip",
        "backup.zip",
    );

    let err = result.unwrap_err();
    assert!(matches!(err, IngestError::Validation(_)));
    assert!(err.to_string().contains("unsupported file type"));
    assert!(kb.is_empty());
}

#[test]
fn knowledge_base_is_the_ordered_join_of_accepted_fragments() {
    let mut kb = KnowledgeBase::new();
    let mut accepted = Vec::new();

    for input in ["first note", "   ", "second note"] {
        if let Ok(fragment) = manual_fragment(input) {
            kb.append(&fragment);
            accepted.push(fragment);
        }
    }
    if let Ok(fragment) = qa_fragment("Opening hours?", "9 to 5, weekdays.") {
        kb.append(&fragment);
        accepted.push(fragment);
    }
    // Rejected: incomplete pair and unsupported file type.
    assert!(qa_fragment("Orphan question?", "").is_err());
    assert!(file_fragment(&DefaultPdfExtractor, b"\x89PNG", "image/png", "logo.png").is_err());

    assert_eq!(kb.as_text(), accepted.join("\n\n"));
    assert!(!kb.as_text().contains("Orphan question?"));
}
