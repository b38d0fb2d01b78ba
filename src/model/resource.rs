//! Raster resources (chart captures, logos) embedded in the document.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Index of an image in the document's image registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageId(pub usize);

/// A decoded raster image with 8-bit RGB pixels, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterImage {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Packed RGB samples
    #[serde(skip_serializing, default)]
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Create an image from packed RGB samples.
    pub fn from_rgb8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let image = Self {
            width,
            height,
            pixels,
        };
        image.validate()?;
        Ok(image)
    }

    /// Check that the size is non-zero and matches the pixel buffer.
    ///
    /// Images built as literals or deserialized without samples fail here.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidRaster(format!(
                "empty raster {}x{}",
                self.width, self.height
            )));
        }
        let expected = self.width as usize * self.height as usize * 3;
        if self.pixels.len() != expected {
            return Err(Error::InvalidRaster(format!(
                "expected {} bytes for {}x{} RGB, got {}",
                expected,
                self.width,
                self.height,
                self.pixels.len()
            )));
        }
        Ok(())
    }

    /// Create an image filled with a single color.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self> {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self::from_rgb8(width, height, pixels)
    }

    /// Decode PNG or JPEG bytes. Transparent pixels are flattened onto white.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
        for px in decoded.pixels() {
            let [r, g, b, a] = px.0;
            let alpha = a as u32;
            for channel in [r, g, b] {
                let blended = (channel as u32 * alpha + 255 * (255 - alpha)) / 255;
                pixels.push(blended as u8);
            }
        }
        Self::from_rgb8(width, height, pixels)
    }

    /// Packed pixel rows in `start..end`, clamped to the image height.
    ///
    /// Returns `None` when the pixel buffer is shorter than its size claims.
    pub fn rows(&self, start: u32, end: u32) -> Option<&[u8]> {
        let stride = self.width as usize * 3;
        let start = start.min(self.height) as usize * stride;
        let end = end.min(self.height) as usize * stride;
        self.pixels.get(start..end.max(start))
    }
}
