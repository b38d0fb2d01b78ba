//! Layout cursor and page break calculation.

use super::PageGeometry;
use serde::{Deserialize, Serialize};

/// Tolerance for floating point comparisons, in points.
pub const EPSILON: f32 = 0.01;

/// Current write position: a page index and a vertical offset on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    /// Page number (1-indexed)
    pub page: u32,
    /// Top of the next block
    pub y: f32,
}

impl Cursor {
    /// Cursor at the top of the content area of `page`.
    pub fn top(page: u32, geom: &PageGeometry) -> Self {
        Self {
            page,
            y: geom.content_top(),
        }
    }

    /// Check if nothing has been placed on the current page yet.
    pub fn at_top(&self, geom: &PageGeometry) -> bool {
        self.y <= geom.content_top() + EPSILON
    }

    /// Space left above the content bottom.
    pub fn remaining(&self, geom: &PageGeometry) -> f32 {
        (geom.content_bottom() - self.y).max(0.0)
    }

    /// Cursor at the top of the following page.
    pub fn next_page(&self, geom: &PageGeometry) -> Self {
        Self::top(self.page + 1, geom)
    }

    /// Cursor after a block of `height` plus the block gap.
    pub fn advance(&self, height: f32, geom: &PageGeometry) -> Self {
        Self {
            page: self.page,
            y: self.y + height + geom.block_spacing,
        }
    }
}

/// Vertical extent of a flowable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Extent {
    /// Text lines; only splittable between lines
    Lines(Vec<f32>),
    /// A raster block of the given height; splittable into strips
    Raster(f32),
}

impl Extent {
    /// Total required height.
    pub fn height(&self) -> f32 {
        match self {
            Extent::Lines(lines) => lines.iter().sum(),
            Extent::Raster(h) => *h,
        }
    }

    /// Number of text lines, zero for rasters.
    pub fn line_count(&self) -> usize {
        match self {
            Extent::Lines(lines) => lines.len(),
            Extent::Raster(_) => 0,
        }
    }
}

/// Outcome of a placement request.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// The whole block is placed at `y`; continue at `cursor`.
    Fits {
        /// Top of the placed block
        y: f32,
        /// Cursor after the block
        cursor: Cursor,
    },
    /// Nothing is placed; retry at the top of the next page.
    NewPage,
    /// `head` is placed at `y` on the current page and fills it; `tail`
    /// continues at the top of the next page.
    Split {
        /// Top of the head part
        y: f32,
        /// Part placed on the current page
        head: Extent,
        /// Remainder for the following pages
        tail: Extent,
    },
}

/// Decide where a block of the given extent lands.
///
/// A page that has nothing on it is never abandoned: `NewPage` is only
/// returned when the cursor is below the top of the content area. Text is
/// split between lines only when the block is taller than a whole page.
/// Rasters taller than a page are sliced; the first strip uses the space left
/// on the current page when at least `min_strip_height` remains.
pub fn place(cursor: Cursor, extent: &Extent, geom: &PageGeometry) -> Placement {
    let height = extent.height();
    let remaining = cursor.remaining(geom);
    let at_top = cursor.at_top(geom);

    if height <= remaining + EPSILON {
        return Placement::Fits {
            y: cursor.y,
            cursor: cursor.advance(height, geom),
        };
    }

    let oversized = height > geom.content_height() + EPSILON;

    match extent {
        Extent::Lines(lines) => {
            if !oversized && !at_top {
                return Placement::NewPage;
            }

            let mut used = 0.0;
            let mut count = 0;
            for h in lines {
                if used + h > remaining + EPSILON {
                    break;
                }
                used += h;
                count += 1;
            }

            if count == 0 {
                if !at_top {
                    return Placement::NewPage;
                }
                // A single line taller than the page: place it anyway.
                count = 1;
                if lines.len() <= 1 {
                    return Placement::Fits {
                        y: cursor.y,
                        cursor: cursor.advance(height, geom),
                    };
                }
            }

            Placement::Split {
                y: cursor.y,
                head: Extent::Lines(lines[..count].to_vec()),
                tail: Extent::Lines(lines[count..].to_vec()),
            }
        }
        Extent::Raster(_) => {
            if !oversized && !at_top {
                return Placement::NewPage;
            }
            if !at_top && remaining + EPSILON < geom.min_strip_height {
                return Placement::NewPage;
            }
            if remaining <= EPSILON {
                // Degenerate geometry with no content height.
                return Placement::Fits {
                    y: cursor.y,
                    cursor: cursor.advance(height, geom),
                };
            }
            Placement::Split {
                y: cursor.y,
                head: Extent::Raster(remaining),
                tail: Extent::Raster(height - remaining),
            }
        }
    }
}

/// Number of pages a content run of `height` occupies when it starts at the
/// top of a fresh page and is sliced freely.
pub fn pages_needed(height: f32, geom: &PageGeometry) -> u32 {
    if height <= EPSILON {
        return 1;
    }
    let ratio = height / geom.content_height();
    let whole = ratio.floor();
    if ratio - whole <= EPSILON / geom.content_height() {
        (whole as u32).max(1)
    } else {
        whole as u32 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom() -> PageGeometry {
        PageGeometry::default()
    }

    #[test]
    fn test_fits_advances_cursor() {
        let g = geom();
        let cursor = Cursor::top(1, &g);
        match place(cursor, &Extent::Lines(vec![12.0, 12.0]), &g) {
            Placement::Fits { y, cursor: next } => {
                assert_eq!(y, g.content_top());
                assert!((next.y - (g.content_top() + 24.0 + g.block_spacing)).abs() < EPSILON);
                assert_eq!(next.page, 1);
            }
            other => panic!("expected fit, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_fit_at_bottom() {
        let g = geom();
        let cursor = Cursor {
            page: 1,
            y: g.content_bottom() - 20.0,
        };
        assert!(matches!(
            place(cursor, &Extent::Lines(vec![20.0]), &g),
            Placement::Fits { .. }
        ));
    }

    #[test]
    fn test_overflow_moves_to_new_page() {
        let g = geom();
        let cursor = Cursor {
            page: 1,
            y: g.content_bottom() - 10.0,
        };
        assert_eq!(
            place(cursor, &Extent::Lines(vec![14.0, 14.0]), &g),
            Placement::NewPage
        );
        assert_eq!(place(cursor, &Extent::Raster(100.0), &g), Placement::NewPage);
    }

    #[test]
    fn test_never_new_page_at_top() {
        let g = geom();
        let cursor = Cursor::top(3, &g);
        let tall = Extent::Lines(vec![20.0; 100]);
        assert!(matches!(place(cursor, &tall, &g), Placement::Split { .. }));
        let huge_line = Extent::Lines(vec![g.content_height() * 2.0]);
        assert!(matches!(place(cursor, &huge_line, &g), Placement::Fits { .. }));
    }

    #[test]
    fn test_tall_text_splits_between_lines() {
        let g = geom();
        let cursor = Cursor::top(1, &g);
        let lines = vec![10.0; 100];
        match place(cursor, &Extent::Lines(lines), &g) {
            Placement::Split { head, tail, .. } => {
                assert_eq!(head.line_count(), (g.content_height() / 10.0).floor() as usize);
                assert_eq!(head.line_count() + tail.line_count(), 100);
            }
            other => panic!("expected split, got {:?}", other),
        }
    }

    #[test]
    fn test_tall_raster_fills_remaining_space() {
        let g = geom();
        let cursor = Cursor {
            page: 1,
            y: g.content_top() + 100.0,
        };
        let total = g.content_height() * 1.5;
        match place(cursor, &Extent::Raster(total), &g) {
            Placement::Split { y, head, tail } => {
                assert_eq!(y, cursor.y);
                assert!((head.height() - (g.content_height() - 100.0)).abs() < EPSILON);
                assert!((head.height() + tail.height() - total).abs() < EPSILON);
            }
            other => panic!("expected split, got {:?}", other),
        }
    }

    #[test]
    fn test_tall_raster_skips_sliver() {
        let g = geom();
        let cursor = Cursor {
            page: 1,
            y: g.content_bottom() - g.min_strip_height / 2.0,
        };
        let total = g.content_height() * 2.0;
        assert_eq!(place(cursor, &Extent::Raster(total), &g), Placement::NewPage);
    }

    fn run(extent: Extent, g: &PageGeometry) -> u32 {
        let mut cursor = Cursor::top(1, g);
        let mut pending = extent;
        let mut guard = 0;
        loop {
            guard += 1;
            assert!(guard < 1000, "placement did not terminate");
            match place(cursor, &pending, g) {
                Placement::Fits { cursor: next, .. } => return next.page,
                Placement::NewPage => cursor = cursor.next_page(g),
                Placement::Split { tail, .. } => {
                    cursor = cursor.next_page(g);
                    pending = tail;
                }
            }
        }
    }

    #[test]
    fn test_raster_page_count_is_ceiling() {
        let g = geom();
        for factor in [1.0_f32, 1.2, 2.0, 2.5, 3.999, 7.0] {
            let height = g.content_height() * factor;
            let expected = (factor - EPSILON / g.content_height()).ceil().max(1.0) as u32;
            assert_eq!(run(Extent::Raster(height), &g), expected, "factor {}", factor);
            assert_eq!(pages_needed(height, &g), expected, "factor {}", factor);
        }
    }

    #[test]
    fn test_text_page_count_is_ceiling() {
        let g = PageGeometry {
            margin_bottom: 41.89,
            ..PageGeometry::default()
        };
        let line = g.content_height() / 50.0;
        let lines = vec![line; 120];
        assert_eq!(run(Extent::Lines(lines), &g), 3);
    }
}
