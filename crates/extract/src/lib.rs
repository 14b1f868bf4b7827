//! # studygen-extract: PDF Text Extraction
//!
//! Turns an uploaded PDF byte stream into a [`Document`]: the plain text of
//! every page concatenated in page order, plus the page count. Pages that
//! yield no extractable text contribute an empty string, never an error.
//! Truncation to the prompt-size bound is the caller's job.

use pdf::file::FileOptions;
use studygen::Document;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to parse PDF content: {0}")]
    Parse(String),
}

/// Extracts the text of every page of a PDF synchronously.
///
/// Fails with [`ExtractError::Parse`] when the byte stream is not a
/// well-formed PDF; an extractable but textless document (e.g. pure scans)
/// is a valid, empty result.
pub fn extract_document(data: &[u8]) -> Result<Document, ExtractError> {
    let file = FileOptions::cached()
        .load(data)
        .map_err(|e| ExtractError::Parse(e.to_string()))?;
    let resolver = file.resolver();
    let mut full_text = String::new();

    for page_num in 0..file.num_pages() {
        let page = file
            .get_page(page_num)
            .map_err(|e| ExtractError::Parse(e.to_string()))?;
        if let Some(content) = &page.contents {
            let operations = content
                .operations(&resolver)
                .map_err(|e| ExtractError::Parse(e.to_string()))?;
            for op in operations.iter() {
                if let pdf::content::Op::TextDraw { text } = op {
                    full_text.push_str(&text.to_string_lossy());
                }
            }
        }
    }

    if full_text.trim().is_empty() {
        warn!(
            pages = file.num_pages(),
            "PDF yielded no extractable text; producing an empty document"
        );
    }

    Ok(Document {
        text: full_text,
        page_count: file.num_pages() as usize,
    })
}
