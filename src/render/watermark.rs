//! Watermark and branding stamps.
//!
//! Stamps are written to [`Page::stamp`] only; committed content and footers
//! are never touched.

use super::style;
use crate::layout::text_width;
use crate::model::{DrawOp, Font, ImageId, Page};

/// A resolved logo ready to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoRef {
    /// Image in the document registry
    pub image: ImageId,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl LogoRef {
    /// Drawn size inside a `max_w` x `max_h` box, aspect preserved.
    pub fn fit(&self, max_w: f32, max_h: f32) -> (f32, f32) {
        if self.width == 0 || self.height == 0 {
            return (0.0, 0.0);
        }
        let scale = (max_w / self.width as f32).min(max_h / self.height as f32);
        (self.width as f32 * scale, self.height as f32 * scale)
    }
}

/// What to stamp on every page.
#[derive(Debug, Clone, PartialEq)]
pub struct Watermark {
    /// Diagonal text
    pub text: String,
    /// Optional centered logo
    pub logo: Option<LogoRef>,
}

impl Watermark {
    /// Text-only watermark.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            logo: None,
        }
    }

    /// Add a logo.
    pub fn with_logo(mut self, logo: Option<LogoRef>) -> Self {
        self.logo = logo;
        self
    }

    /// Font size that lets the text span about 60% of the page diagonal.
    ///
    /// The text is measured as stored, so it should already be normalized
    /// to drawable characters.
    pub fn font_size(&self, page: &Page) -> f32 {
        let unit = text_width(self.text.trim(), Font::Bold, 1.0);
        if unit <= 0.0 {
            return style::WATERMARK_MAX_SIZE;
        }
        let diagonal = (page.width * page.width + page.height * page.height).sqrt();
        (diagonal * 0.6 / unit).min(style::WATERMARK_MAX_SIZE)
    }

    /// Build the stamp operations for `page`.
    pub fn ops(&self, page: &Page) -> Vec<DrawOp> {
        let mut ops = Vec::new();
        let cx = page.width / 2.0;
        let cy = page.height / 2.0;

        if let Some(logo) = self.logo {
            let (w, h) = logo.fit(page.width * 0.4, page.height * 0.25);
            if w > 0.0 && h > 0.0 {
                ops.push(DrawOp::Image {
                    x: cx - w / 2.0,
                    y: cy - h / 2.0,
                    width: w,
                    height: h,
                    image: logo.image,
                    row_start: 0,
                    row_end: logo.height,
                    opacity: style::WATERMARK_OPACITY,
                });
            }
        }

        let text = self.text.trim();
        if !text.is_empty() {
            let size = self.font_size(page);
            let width = text_width(text, Font::Bold, size);
            let theta = style::WATERMARK_ANGLE.to_radians();
            let (sin, cos) = theta.sin_cos();
            // Baseline start such that the rotated run is centered on the
            // page; y grows downwards here, rotation is counter-clockwise.
            let half = width / 2.0;
            let lift = size * 0.35;
            let x = cx - half * cos + lift * sin;
            let y = cy + half * sin + lift * cos;
            ops.push(DrawOp::Text {
                x,
                y,
                text: text.to_string(),
                font: Font::Bold,
                size,
                color: style::STAMP,
                angle: style::WATERMARK_ANGLE,
                opacity: style::WATERMARK_OPACITY,
            });
        }
        ops
    }

    /// Replace the stamp of `page`.
    pub fn stamp(&self, page: &mut Page) {
        page.stamp = self.ops(page);
    }
}

/// Stamp every page.
pub fn stamp_all(pages: &mut [Page], watermark: &Watermark) -> u32 {
    let mut stamped = 0;
    for page in pages.iter_mut() {
        watermark.stamp(page);
        if page.is_watermarked() {
            stamped += 1;
        }
    }
    log::debug!("Stamped {} of {} pages with '{}'", stamped, pages.len(), watermark.text);
    stamped
}
