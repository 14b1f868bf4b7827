//! Fixed-layout PDF encoder built on `printpdf`.
//!
//! Each line becomes a fixed-height text cell in a single running column;
//! a new page starts when the column is exhausted. Only the built-in
//! Helvetica is used, so no glyphs exist outside Latin text.

use crate::{paragraph_lines, ExportError};
use printpdf::{
    BuiltinFont, Layer, Mm, Op, ParsedFont, PdfDocument, PdfPage, PdfSaveOptions, Pt, TextItem,
    TextMatrix, TextRenderingMode,
};
use tracing::debug;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 12.0;
const CELL_HEIGHT_MM: f32 = 6.0;
const FONT_SIZE_PT: f32 = 11.0;
/// Character column at which long lines wrap into the next cell.
const WRAP_COLUMNS: usize = 90;

/// The cell buffer the encoder writes: markdown stripped, every character
/// outside the 7-bit printable range dropped, long lines wrapped at a fixed
/// column. Exposed so the ASCII guarantee is directly testable.
pub fn pdf_cell_lines(title: &str, text: &str) -> Result<Vec<String>, ExportError> {
    let mut cells = Vec::new();
    for raw in std::iter::once(title.to_string()).chain(paragraph_lines(text)?) {
        let ascii: String = raw.chars().filter(|c| (' '..='~').contains(c)).collect();
        let trimmed = ascii.trim_end();
        if trimmed.is_empty() {
            continue;
        }
        for chunk in wrap_line(trimmed, WRAP_COLUMNS) {
            cells.push(chunk);
        }
    }
    Ok(cells)
}

/// Wraps a single ASCII line at `columns`, breaking on the last space where
/// possible and hard-cutting unbroken runs.
fn wrap_line(line: &str, columns: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = line;
    while rest.len() > columns {
        let cut = rest[..columns]
            .rfind(' ')
            .filter(|&i| i > 0)
            .unwrap_or(columns);
        chunks.push(rest[..cut].trim_end().to_string());
        rest = rest[cut..].trim_start();
    }
    if !rest.is_empty() {
        chunks.push(rest.to_string());
    }
    chunks
}

/// Encodes a result as a fixed-layout PDF, the title as the first cell.
pub fn encode_pdf(title: &str, text: &str) -> Result<Vec<u8>, ExportError> {
    let cells = pdf_cell_lines(title, text)?;
    let cells_per_page = ((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / CELL_HEIGHT_MM) as usize;
    debug!(cells = cells.len(), cells_per_page, "encoding PDF export");

    let mut doc = PdfDocument::new(title);
    let layer_id = doc.add_layer(&Layer::new("Layer 1"));

    let font_bytes = BuiltinFont::Helvetica.get_subset_font().bytes;
    let font = ParsedFont::from_bytes(&font_bytes, 0, &mut Vec::new())
        .ok_or_else(|| ExportError::Pdf("failed to parse built-in font".to_string()))?;
    let font_id = doc.add_font(&font);

    // An empty result still yields one blank page rather than a zero-page file.
    let mut page_chunks: Vec<&[String]> = cells.chunks(cells_per_page.max(1)).collect();
    if page_chunks.is_empty() {
        page_chunks.push(&[]);
    }

    for page_cells in page_chunks {
        let mut ops = vec![
            Op::BeginLayer {
                layer_id: layer_id.clone(),
            },
            Op::SetFontSize {
                size: Pt(FONT_SIZE_PT),
                font: font_id.clone(),
            },
            Op::StartTextSection,
            Op::SetTextRenderingMode {
                mode: TextRenderingMode::Fill,
            },
        ];

        let mut y_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        for cell in page_cells {
            ops.push(Op::SetTextMatrix {
                matrix: TextMatrix::Translate(Mm(MARGIN_MM).into(), Mm(y_mm).into()),
            });
            ops.push(Op::WriteText {
                items: vec![TextItem::Text(cell.clone())],
                font: font_id.clone(),
            });
            y_mm -= CELL_HEIGHT_MM;
        }

        ops.push(Op::EndTextSection);
        ops.push(Op::EndLayer {
            layer_id: layer_id.clone(),
        });

        let mut page = PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), vec![]);
        page.ops = ops;
        doc.pages.push(page);
    }

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        debug!(?warnings, "printpdf reported warnings during save");
    }
    Ok(bytes)
}
