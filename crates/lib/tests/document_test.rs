//! # Document Store Tests
//!
//! Round-trips a generated PDF through the extraction path and checks the
//! error reporting for missing or unreadable files.

use askdoc::{DocumentError, DocumentStore};
use askdoc_test_utils::helpers::generate_test_pdf;
use std::fs;

#[test]
fn test_load_extracts_text_from_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reference.pdf");
    let pdf_bytes = generate_test_pdf("The capital of Testland is Examville.").unwrap();
    fs::write(&path, pdf_bytes).unwrap();

    let store = DocumentStore::load(&path).expect("load should succeed");
    assert!(
        store.text().contains("The capital of Testland is Examville."),
        "extracted text was: {:?}",
        store.text()
    );
    assert_eq!(store.path(), path);
}

#[test]
fn test_missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.pdf");

    let err = DocumentStore::load(&path).unwrap_err();
    assert!(matches!(err, DocumentError::NotFound(_)));
}

#[test]
fn test_garbage_bytes_are_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not_a_pdf.pdf");
    fs::write(&path, b"this is not a pdf").unwrap();

    let err = DocumentStore::load(&path).unwrap_err();
    assert!(matches!(err, DocumentError::Parse(_)));
}
