//! Plain text rendering of a composed document.

use crate::error::Result;
use crate::model::Document;

/// Convert a document to plain text, one line per drawn text run.
///
/// Watermark stamps are left out. With `page_markers` each page is preceded
/// by a `--- Página i ---` line.
pub fn to_text(doc: &Document, page_markers: bool) -> Result<String> {
    if !page_markers {
        return Ok(doc.plain_text().trim().to_string());
    }

    let output = doc
        .pages
        .iter()
        .map(|page| format!("--- Página {} ---\n{}", page.number, page.plain_text()))
        .collect::<Vec<_>>()
        .join("\n\n");
    Ok(output.trim().to_string())
}
