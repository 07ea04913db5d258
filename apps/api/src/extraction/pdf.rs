use std::path::Path;

use crate::extraction::ExtractionError;

/// Text of every page, in page order. Pages without a text layer contribute nothing.
pub fn extract_pdf_text(path: &Path) -> Result<String, ExtractionError> {
    pdf_extract::extract_text(path).map_err(|e| ExtractionError::Pdf(e.to_string()))
}
