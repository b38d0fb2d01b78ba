//! Page geometry, text measurement and the page break calculator.
//!
//! Everything here is pure arithmetic over points: renderers measure their
//! content with [`wrap_text`] and [`text_width`], and the pager asks
//! [`place`] where each block lands.

mod cursor;
mod geometry;
mod text;

pub use cursor::{pages_needed, place, Cursor, Extent, Placement, EPSILON};
pub use geometry::{Orientation, PageGeometry, A4_HEIGHT, A4_WIDTH};
pub use text::{char_width, line_height, text_width, wrap_text, LINE_HEIGHT_FACTOR};
