//! PDF text extraction.
//!
//! Wraps the pdf-extract crate. Page text is concatenated in document
//! order, which is all the quiz generator needs. Corrupted, non-PDF, or
//! encrypted input fails; a scanned/image-only document parses fine and
//! simply yields no text, which downstream turns into an empty quiz.

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not parse PDF: {0}")]
    Parse(#[from] pdf_extract::OutputError),
}

/// Extract the full text of a PDF on disk.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    Ok(pdf_extract::extract_text(path)?)
}

/// Extract the full text of a PDF already held in memory.
pub fn extract_text_from_bytes(bytes: &[u8]) -> Result<String, ExtractError> {
    Ok(pdf_extract::extract_text_from_mem(bytes)?)
}
