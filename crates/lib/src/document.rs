//! # Reference Document Store
//!
//! Loads the single reference document once at startup and holds its extracted
//! text for the lifetime of the process. The document is static configuration,
//! not user data, so the extracted text is treated as immutable and shared
//! read-only behind an `Arc`.

use pdf::file::FileOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Document not found at: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read document '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse PDF content: {0}")]
    Parse(String),
}

/// The extracted text of the reference document.
#[derive(Debug)]
pub struct DocumentStore {
    path: PathBuf,
    text: String,
}

impl DocumentStore {
    /// Loads the document at `path` and extracts its text page by page.
    ///
    /// Pages that yield no text contribute nothing to the result. A missing or
    /// unreadable file is reported as an error, never silently skipped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DocumentError::NotFound(path.to_path_buf()));
        }
        let data = std::fs::read(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let text = extract_text_from_pdf(&data)?;
        if text.trim().is_empty() {
            warn!("Document '{}' yielded no extractable text.", path.display());
        } else {
            info!(
                chars = text.len(),
                "Extracted text from document '{}'.",
                path.display()
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    /// The concatenation of the per-page extracted text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Extracts text from all pages of a PDF synchronously.
fn extract_text_from_pdf(pdf_data: &[u8]) -> Result<String, DocumentError> {
    let file = FileOptions::cached()
        .load(pdf_data)
        .map_err(|e| DocumentError::Parse(e.to_string()))?;
    let resolver = file.resolver();
    let mut full_text = String::new();

    for page_num in 0..file.num_pages() {
        let page = file
            .get_page(page_num)
            .map_err(|e| DocumentError::Parse(e.to_string()))?;
        let Some(content) = &page.contents else {
            debug!(page = page_num, "Page has no content stream, skipping.");
            continue;
        };
        let operations = content
            .operations(&resolver)
            .map_err(|e| DocumentError::Parse(e.to_string()))?;

        let mut page_text = String::new();
        for op in operations.iter() {
            if let pdf::content::Op::TextDraw { text } = op {
                page_text.push_str(&text.to_string_lossy());
            }
        }
        if page_text.is_empty() {
            debug!(page = page_num, "Page yielded no text, skipping.");
            continue;
        }
        full_text.push_str(&page_text);
    }

    Ok(full_text)
}
