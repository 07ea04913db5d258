//! Resume text extraction for the supported upload formats.

pub mod docx;
pub mod pdf;

#[cfg(test)]
pub(crate) mod fixtures;

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to read PDF: {0}")]
    Pdf(String),

    #[error("Failed to read DOCX: {0}")]
    Docx(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Upload formats accepted by the analyzer, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Detects the kind from the text after the last `.`, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }
}

/// Reads the file at `path` and returns its plain text. Blocking.
pub fn extract_text(kind: DocumentKind, path: &Path) -> Result<String, ExtractionError> {
    match kind {
        DocumentKind::Pdf => pdf::extract_pdf_text(path),
        DocumentKind::Docx => {
            let data = std::fs::read(path)?;
            docx::extract_docx_text(&data)
        }
    }
}
