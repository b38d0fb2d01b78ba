//! Page geometry.

use serde::{Deserialize, Serialize};

/// A4 width in points.
pub const A4_WIDTH: f32 = 595.28;

/// A4 height in points.
pub const A4_HEIGHT: f32 = 841.89;

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide
    #[default]
    Portrait,
    /// Wider than tall
    Landscape,
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "portrait" | "p" | "retrato" => Ok(Orientation::Portrait),
            "landscape" | "l" | "paisagem" => Ok(Orientation::Landscape),
            other => Err(format!("unknown orientation: {}", other)),
        }
    }
}

/// Fixed page size, margins and spacing used by the pager.
///
/// Coordinates grow downwards from the top-left corner. The content area is
/// the page minus its margins; footers live in the bottom margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Top margin
    pub margin_top: f32,
    /// Bottom margin
    pub margin_bottom: f32,
    /// Left margin
    pub margin_left: f32,
    /// Right margin
    pub margin_right: f32,
    /// Vertical gap after each placed block
    pub block_spacing: f32,
    /// Smallest raster strip worth starting at the bottom of a page
    pub min_strip_height: f32,
}

impl PageGeometry {
    /// A4 geometry in the given orientation.
    pub fn a4(orientation: Orientation) -> Self {
        let (width, height) = match orientation {
            Orientation::Portrait => (A4_WIDTH, A4_HEIGHT),
            Orientation::Landscape => (A4_HEIGHT, A4_WIDTH),
        };
        Self {
            width,
            height,
            margin_top: 50.0,
            margin_bottom: 50.0,
            margin_left: 40.0,
            margin_right: 40.0,
            block_spacing: 6.0,
            min_strip_height: 48.0,
        }
    }

    /// Top edge of the content area.
    pub fn content_top(&self) -> f32 {
        self.margin_top
    }

    /// Bottom edge of the content area.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin_bottom
    }

    /// Usable height of a page.
    pub fn content_height(&self) -> f32 {
        self.content_bottom() - self.content_top()
    }

    /// Usable width of a page.
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Left edge of the content area.
    pub fn content_left(&self) -> f32 {
        self.margin_left
    }

    /// Baseline of the footer line.
    pub fn footer_baseline(&self) -> f32 {
        self.height - self.margin_bottom / 2.0
    }

    /// Check if the page is wider than tall.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4(Orientation::Portrait)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_orientation() {
        let portrait = PageGeometry::a4(Orientation::Portrait);
        let landscape = PageGeometry::a4(Orientation::Landscape);
        assert_eq!(portrait.width, landscape.height);
        assert!(landscape.is_landscape());
        assert!(!portrait.is_landscape());
    }

    #[test]
    fn test_content_area() {
        let geom = PageGeometry::default();
        assert!((geom.content_height() - (A4_HEIGHT - 100.0)).abs() < 0.001);
        assert!((geom.content_width() - (A4_WIDTH - 80.0)).abs() < 0.001);
        assert!(geom.footer_baseline() > geom.content_bottom());
    }

    #[test]
    fn test_orientation_from_str() {
        assert_eq!("Landscape".parse::<Orientation>(), Ok(Orientation::Landscape));
        assert_eq!("retrato".parse::<Orientation>(), Ok(Orientation::Portrait));
        assert!("diagonal".parse::<Orientation>().is_err());
    }
}
