use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

use crate::extraction::ExtractionError;

/// Body paragraphs, each followed by a newline. Paragraph text is the
/// concatenation of its runs.
pub fn extract_docx_text(data: &[u8]) -> Result<String, ExtractionError> {
    let docx = read_docx(data).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut text = String::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            for paragraph_child in &paragraph.children {
                if let ParagraphChild::Run(run) = paragraph_child {
                    for run_child in &run.children {
                        if let RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}
