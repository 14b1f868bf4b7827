//! # studygen-export: Study Material Export Encoders
//!
//! Pure encoders from a generated result's text to downloadable bytes: plain
//! text, a simple word-processor document, and a fixed-layout PDF. Both rich
//! encoders are deliberately lossy: markdown markers are stripped rather than
//! reconstructed as document structure, and the PDF encoder additionally
//! drops every character outside the 7-bit printable range because the
//! built-in font carries no glyphs for non-Latin scripts.

mod docx;
mod pdf;

pub use docx::encode_docx;
pub use pdf::{encode_pdf, pdf_cell_lines};

use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("Failed to pack DOCX document: {0}")]
    Docx(String),
    #[error("Failed to render PDF document: {0}")]
    Pdf(String),
}

/// The downloadable formats offered for a generation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Docx,
    Pdf,
}

impl ExportFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "text/plain",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// The suggested download file name for a given stem.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "txt" => Ok(ExportFormat::Txt),
            "docx" => Ok(ExportFormat::Docx),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

/// Encodes a result as plain text. The identity encoding.
pub fn encode_txt(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Strips markdown header and emphasis markers, flattening the text to plain
/// lines. Tables and nested lists are not reconstructed.
pub fn strip_markdown(text: &str) -> Result<String, ExportError> {
    let header_re = Regex::new(r"(?m)^\s*#{1,6}\s*")?;
    let without_headers = header_re.replace_all(text, "");
    Ok(without_headers.replace(['*', '`'], ""))
}

/// The non-empty stripped lines both rich encoders emit, one unit per line.
pub(crate) fn paragraph_lines(text: &str) -> Result<Vec<String>, ExportError> {
    Ok(strip_markdown(text)?
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}
