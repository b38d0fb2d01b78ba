//! Fixed typography and colors of the exported document.

use crate::layout::line_height;
use crate::model::{Color, Font};

/// Brand accent used by headings and rules.
pub const ACCENT: Color = Color {
    r: 0.118,
    g: 0.306,
    b: 0.620,
};

/// Body text color.
pub const INK: Color = Color {
    r: 0.133,
    g: 0.133,
    b: 0.157,
};

/// Secondary text color.
pub const MUTED: Color = Color {
    r: 0.42,
    g: 0.44,
    b: 0.48,
};

/// Watermark gray.
pub const STAMP: Color = Color {
    r: 0.5,
    g: 0.5,
    b: 0.5,
};

/// Font, size and color of a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font face
    pub font: Font,
    /// Size in points
    pub size: f32,
    /// Fill color
    pub color: Color,
}

impl TextStyle {
    /// Line height for this style.
    pub fn line_height(&self) -> f32 {
        line_height(self.size)
    }

    /// Baseline offset from the top of a line box.
    pub fn ascent(&self) -> f32 {
        self.size * 1.05
    }
}

/// Section titles.
pub const SECTION_HEADING: TextStyle = TextStyle {
    font: Font::Bold,
    size: 16.0,
    color: ACCENT,
};

/// Headings inside a section.
pub const SUB_HEADING: TextStyle = TextStyle {
    font: Font::Bold,
    size: 12.0,
    color: INK,
};

/// Paragraph text.
pub const BODY: TextStyle = TextStyle {
    font: Font::Regular,
    size: 10.0,
    color: INK,
};

/// De-emphasized paragraph text.
pub const BODY_MUTED: TextStyle = TextStyle {
    font: Font::Regular,
    size: 10.0,
    color: MUTED,
};

/// First-level bullets.
pub const BULLET: TextStyle = BODY;

/// Second-level bullets.
pub const SUB_BULLET: TextStyle = TextStyle {
    font: Font::Regular,
    size: 9.0,
    color: MUTED,
};

/// Key/value labels.
pub const LABEL: TextStyle = TextStyle {
    font: Font::Bold,
    size: 10.0,
    color: INK,
};

/// Image captions.
pub const CAPTION: TextStyle = TextStyle {
    font: Font::Regular,
    size: 9.0,
    color: MUTED,
};

/// Page footer.
pub const FOOTER: TextStyle = TextStyle {
    font: Font::Regular,
    size: 8.0,
    color: MUTED,
};

/// Cover title.
pub const COVER_TITLE: TextStyle = TextStyle {
    font: Font::Bold,
    size: 28.0,
    color: ACCENT,
};

/// Cover subtitle.
pub const COVER_SUBTITLE: TextStyle = TextStyle {
    font: Font::Regular,
    size: 16.0,
    color: INK,
};

/// Cover date and sector lines.
pub const COVER_DETAIL: TextStyle = TextStyle {
    font: Font::Regular,
    size: 12.0,
    color: MUTED,
};

/// Bullet glyph prefix.
pub const BULLET_MARK: &str = "• ";

/// Second-level bullet prefix.
pub const SUB_BULLET_MARK: &str = "– ";

/// Left offset of first-level bullets.
pub const BULLET_INDENT: f32 = 8.0;

/// Left offset of second-level bullets.
pub const SUB_BULLET_INDENT: f32 = 24.0;

/// Left offset of key/value values.
pub const VALUE_INDENT: f32 = 12.0;

/// Extra space above sub-headings.
pub const SUB_HEADING_GAP: f32 = 6.0;

/// Space between a section title and its accent rule.
pub const RULE_GAP: f32 = 4.0;

/// Accent rule stroke width.
pub const RULE_WIDTH: f32 = 1.2;

/// Attribution printed in every footer.
pub const ATTRIBUTION: &str = "Gerado com Plandoc";

/// Opacity of watermark text and logo.
pub const WATERMARK_OPACITY: f32 = 0.15;

/// Watermark rotation in degrees.
pub const WATERMARK_ANGLE: f32 = 45.0;

/// Largest watermark font size.
pub const WATERMARK_MAX_SIZE: f32 = 60.0;

/// Cover date format.
pub const DATE_FORMAT: &str = "%d/%m/%Y";
