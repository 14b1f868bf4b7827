//! Word-processor document encoder built on `docx-rs`.

use crate::{paragraph_lines, ExportError};
use docx_rs::{Docx, Paragraph, Run};
use std::io::Cursor;
use tracing::debug;

/// Encodes a result as a simple DOCX: a bold title paragraph followed by one
/// paragraph per non-empty line of the markdown-stripped text.
pub fn encode_docx(title: &str, text: &str) -> Result<Vec<u8>, ExportError> {
    let lines = paragraph_lines(text)?;
    debug!(paragraphs = lines.len(), "encoding DOCX export");

    let mut docx = Docx::new().add_paragraph(
        Paragraph::new().add_run(Run::new().add_text(title).bold().size(32)),
    );
    for line in &lines {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)));
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| ExportError::Docx(e.to_string()))?;
    Ok(cursor.into_inner())
}
