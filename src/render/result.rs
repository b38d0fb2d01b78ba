//! Export statistics.

use serde::{Deserialize, Serialize};

/// Statistics collected while composing an export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStats {
    /// Total number of pages produced
    pub page_count: u32,

    /// Number of sections rendered (cover included)
    pub section_count: u32,

    /// Number of text lines drawn, footers excluded
    pub text_line_count: u32,

    /// Number of distinct images registered
    pub image_count: u32,

    /// Number of image strips drawn across pages
    pub strip_count: u32,

    /// Number of page breaks forced by overflow
    pub overflow_breaks: u32,

    /// Number of pages carrying a watermark stamp
    pub watermarked_pages: u32,
}

impl ExportStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment section count.
    pub fn add_section(&mut self) {
        self.section_count += 1;
    }

    /// Add drawn text lines.
    pub fn add_lines(&mut self, count: usize) {
        self.text_line_count += count as u32;
    }

    /// Increment image count.
    pub fn add_image(&mut self) {
        self.image_count += 1;
    }

    /// Increment strip count.
    pub fn add_strip(&mut self) {
        self.strip_count += 1;
    }

    /// Increment overflow break count.
    pub fn add_overflow_break(&mut self) {
        self.overflow_breaks += 1;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExportStats) {
        self.page_count += other.page_count;
        self.section_count += other.section_count;
        self.text_line_count += other.text_line_count;
        self.image_count += other.image_count;
        self.strip_count += other.strip_count;
        self.overflow_breaks += other.overflow_breaks;
        self.watermarked_pages += other.watermarked_pages;
    }
}
