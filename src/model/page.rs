//! Page-level types.
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page and `y` growing downwards. The PDF writer flips them.

use super::ImageId;
use serde::{Deserialize, Serialize};

/// Standard font used for a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Font {
    /// Helvetica
    Regular,
    /// Helvetica-Bold
    Bold,
}

impl Font {
    /// PostScript name of the base font.
    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    /// Resource name used in content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
}

impl Color {
    /// Create a color from 8-bit components.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }
}

/// A primitive draw operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// A single line of text; `y` is the baseline.
    Text {
        /// X position of the baseline start
        x: f32,
        /// Baseline y position
        y: f32,
        /// Text content
        text: String,
        /// Font face
        font: Font,
        /// Font size in points
        size: f32,
        /// Fill color
        color: Color,
        /// Counter-clockwise rotation in degrees
        angle: f32,
        /// Fill opacity
        opacity: f32,
    },

    /// A straight stroked line.
    Rule {
        /// Start x
        x1: f32,
        /// Start y
        y1: f32,
        /// End x
        x2: f32,
        /// End y
        y2: f32,
        /// Stroke color
        color: Color,
        /// Stroke width in points
        width: f32,
    },

    /// A raster image, or a horizontal strip of one.
    Image {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Drawn width
        width: f32,
        /// Drawn height
        height: f32,
        /// Image in the document registry
        image: ImageId,
        /// First source pixel row (inclusive)
        row_start: u32,
        /// Last source pixel row (exclusive)
        row_end: u32,
        /// Fill opacity
        opacity: f32,
    },
}

impl DrawOp {
    /// Create an upright, opaque text operation.
    pub fn text(
        x: f32,
        y: f32,
        text: impl Into<String>,
        font: Font,
        size: f32,
        color: Color,
    ) -> Self {
        DrawOp::Text {
            x,
            y,
            text: text.into(),
            font,
            size,
            color,
            angle: 0.0,
            opacity: 1.0,
        }
    }

    /// Create a stroked rule.
    pub fn rule(x1: f32, y1: f32, x2: f32, y2: f32, color: Color, width: f32) -> Self {
        DrawOp::Rule {
            x1,
            y1,
            x2,
            y2,
            color,
            width,
        }
    }

    /// Text content if this is a text operation.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Check if this operation is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, DrawOp::Image { .. })
    }
}

/// A single page in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Content committed during pagination
    pub ops: Vec<DrawOp>,

    /// Footer drawn once the page total is known
    pub footer: Vec<DrawOp>,

    /// Watermark stamp, drawn above everything else
    pub stamp: Vec<DrawOp>,
}

impl Page {
    /// Create a new empty page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            ops: Vec::new(),
            footer: Vec::new(),
            stamp: Vec::new(),
        }
    }

    /// Create a new page with standard A4 size (210 x 297 mm).
    pub fn a4(number: u32) -> Self {
        Self::new(number, 595.28, 841.89)
    }

    /// Commit a content operation.
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// All operations in drawing order.
    pub fn all_ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().chain(&self.footer).chain(&self.stamp)
    }

    /// Text lines of the page content in drawing order, one per line.
    pub fn plain_text(&self) -> String {
        self.ops
            .iter()
            .chain(&self.footer)
            .filter_map(DrawOp::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the page has no content operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Check if the page carries a watermark stamp.
    pub fn is_watermarked(&self) -> bool {
        !self.stamp.is_empty()
    }

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_new() {
        let page = Page::a4(1);
        assert_eq!(page.number, 1);
        assert!(page.is_empty());
        assert!(!page.is_landscape());
        assert!(!page.is_watermarked());
    }

    #[test]
    fn test_plain_text_skips_stamp() {
        let mut page = Page::a4(1);
        let black = Color::rgb8(0, 0, 0);
        page.push(DrawOp::text(10.0, 20.0, "Body", Font::Regular, 10.0, black));
        page.footer
            .push(DrawOp::text(10.0, 800.0, "1 / 1", Font::Regular, 8.0, black));
        page.stamp
            .push(DrawOp::text(100.0, 400.0, "DEMO", Font::Bold, 60.0, black));

        assert_eq!(page.plain_text(), "Body\n1 / 1");
        assert_eq!(page.all_ops().count(), 3);
        assert!(page.is_watermarked());
    }
}
