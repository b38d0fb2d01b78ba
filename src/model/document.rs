//! Document-level types.

use super::{ImageId, Page, RasterImage};
use crate::error::Result;
use crate::render::ExportStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// A composed, paginated export ready to be serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, etc.)
    pub metadata: Metadata,

    /// Pages in the document
    pub pages: Vec<Page>,

    /// Raster images referenced by image operations
    pub images: Vec<RasterImage>,

    /// Statistics collected while composing
    pub stats: ExportStats,

    /// Output file name hint for the caller's save step
    pub filename: Option<String>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            pages: Vec::new(),
            images: Vec::new(),
            stats: ExportStats::default(),
            filename: None,
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Register an image and return its id.
    pub fn add_image(&mut self, image: RasterImage) -> ImageId {
        self.images.push(image);
        ImageId(self.images.len() - 1)
    }

    /// Get a registered image.
    pub fn image(&self, id: ImageId) -> Option<&RasterImage> {
        self.images.get(id.0)
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get plain text content of the entire document, page by page.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// File name to save the document under.
    pub fn suggested_filename(&self) -> String {
        if let Some(ref name) = self.filename {
            if name.to_lowercase().ends_with(".pdf") {
                return name.clone();
            }
            return format!("{}.pdf", name);
        }
        let stem = slugify(self.metadata.title.as_deref().unwrap_or("documento"));
        format!("{}.pdf", stem)
    }

    /// Serialize the document to PDF bytes.
    pub fn to_pdf_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_pdf(&mut out)?;
        Ok(out)
    }

    /// Serialize the document as PDF into a writer.
    pub fn write_pdf<W: Write>(&self, writer: &mut W) -> Result<()> {
        crate::render::pdf::write_document(self, writer)
    }
}

fn slugify(s: &str) -> String {
    let slug: String = s
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let parts: Vec<&str> = slug.split('-').filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        "documento".to_string()
    } else {
        parts.join("-")
    }
}

/// Document metadata written to the PDF info dictionary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create metadata with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new(Metadata::default());
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert!(doc.get_page(0).is_none());
        assert!(doc.get_page(1).is_none());
    }

    #[test]
    fn test_add_image_assigns_sequential_ids() {
        let mut doc = Document::new(Metadata::default());
        let a = doc.add_image(RasterImage::solid(1, 1, [0, 0, 0]).unwrap());
        let b = doc.add_image(RasterImage::solid(2, 1, [0, 0, 0]).unwrap());
        assert_eq!(a, ImageId(0));
        assert_eq!(b, ImageId(1));
        assert_eq!(doc.image(b).unwrap().width, 2);
    }

    #[test]
    fn test_suggested_filename() {
        let mut doc = Document::new(Metadata::with_title("Plano Estratégico 2025"));
        assert_eq!(doc.suggested_filename(), "plano-estrat-gico-2025.pdf");

        doc.filename = Some("acme".into());
        assert_eq!(doc.suggested_filename(), "acme.pdf");

        doc.filename = Some("Acme.PDF".into());
        assert_eq!(doc.suggested_filename(), "Acme.PDF");
    }
}
