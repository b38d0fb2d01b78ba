//! Raster capture and asset resolution.
//!
//! Rendering a chart or a dashboard region into pixels is outside this
//! crate. The pipeline only asks a [`RasterSource`] for the image behind a
//! region reference, and an [`AssetSource`] for branding assets such as the
//! company logo.

use crate::error::{Error, Result};
use crate::model::RasterImage;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Produces raster images for region references.
pub trait RasterSource {
    /// Capture the region named `region`.
    ///
    /// Returns [`Error::SourceNotFound`] when the region does not exist and
    /// [`Error::RasterCapture`] when capturing it failed.
    fn capture_region(&self, region: &str) -> Result<RasterImage>;
}

impl<F> RasterSource for F
where
    F: Fn(&str) -> Result<RasterImage>,
{
    fn capture_region(&self, region: &str) -> Result<RasterImage> {
        self(region)
    }
}

/// Resolves branding assets.
pub trait AssetSource {
    /// Resolve `reference` to an image, or fail with
    /// [`Error::AssetResolution`].
    fn resolve_asset(&self, reference: &str) -> Result<RasterImage>;
}

/// Resolve the logo, downgrading any failure to `None` with a warning.
pub fn resolve_logo(source: Option<&dyn AssetSource>, reference: Option<&str>) -> Option<RasterImage> {
    let reference = reference.map(str::trim).filter(|r| !r.is_empty())?;
    let Some(source) = source else {
        log::warn!(
            "Logo '{}' requested but no asset source is configured; using text only",
            reference
        );
        return None;
    };
    match source.resolve_asset(reference) {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!("Logo '{}' could not be resolved ({}); using text only", reference, e);
            None
        }
    }
}

/// In-memory images keyed by region reference.
#[derive(Debug, Clone, Default)]
pub struct MemoryRasterSource {
    images: HashMap<String, RasterImage>,
}

impl MemoryRasterSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image under `region`.
    pub fn with(mut self, region: impl Into<String>, image: RasterImage) -> Self {
        self.insert(region, image);
        self
    }

    /// Add an image under `region`.
    pub fn insert(&mut self, region: impl Into<String>, image: RasterImage) {
        self.images.insert(region.into(), image);
    }

    /// Number of stored images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Check if no images are stored.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl RasterSource for MemoryRasterSource {
    fn capture_region(&self, region: &str) -> Result<RasterImage> {
        self.images
            .get(region)
            .cloned()
            .ok_or_else(|| Error::SourceNotFound(region.to_string()))
    }
}

impl AssetSource for MemoryRasterSource {
    fn resolve_asset(&self, reference: &str) -> Result<RasterImage> {
        self.images
            .get(reference)
            .cloned()
            .ok_or_else(|| Error::AssetResolution(reference.to_string()))
    }
}

/// PNG or JPEG files; region references are paths relative to a root.
#[derive(Debug, Clone)]
pub struct FileRasterSource {
    root: PathBuf,
}

impl FileRasterSource {
    /// Resolve references relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve references relative to the working directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    /// Path a reference resolves to.
    pub fn path_for(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl RasterSource for FileRasterSource {
    fn capture_region(&self, region: &str) -> Result<RasterImage> {
        let path = self.path_for(region);
        log::debug!("Capturing region '{}' from {}", region, path.display());
        read_image(&path).map_err(|e| match e {
            CaptureFailure::Missing => Error::SourceNotFound(region.to_string()),
            CaptureFailure::Failed(msg) => {
                Error::RasterCapture(format!("{}: {}", path.display(), msg))
            }
        })
    }
}

impl AssetSource for FileRasterSource {
    fn resolve_asset(&self, reference: &str) -> Result<RasterImage> {
        let path = self.path_for(reference);
        read_image(&path).map_err(|e| match e {
            CaptureFailure::Missing => Error::AssetResolution(reference.to_string()),
            CaptureFailure::Failed(msg) => {
                Error::AssetResolution(format!("{}: {}", reference, msg))
            }
        })
    }
}

enum CaptureFailure {
    Missing,
    Failed(String),
}

fn read_image(path: &Path) -> std::result::Result<RasterImage, CaptureFailure> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CaptureFailure::Missing,
        _ => CaptureFailure::Failed(e.to_string()),
    })?;
    RasterImage::decode(&bytes).map_err(|e| CaptureFailure::Failed(e.to_string()))
}

/// Read and decode an image file without blocking the runtime.
///
/// A missing file is [`Error::SourceNotFound`]; unreadable or undecodable
/// content is [`Error::RasterCapture`].
#[cfg(feature = "async")]
pub async fn capture_file_async(path: impl AsRef<Path>) -> Result<RasterImage> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::SourceNotFound(path.display().to_string()),
        _ => Error::RasterCapture(format!("{}: {}", path.display(), e)),
    })?;
    RasterImage::decode(&bytes)
        .map_err(|e| Error::RasterCapture(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([10, 200, 30]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageOutputFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_memory_source() {
        let source = MemoryRasterSource::new().with("chart", RasterImage::solid(2, 2, [0, 0, 0]).unwrap());
        assert_eq!(source.len(), 1);
        assert!(source.capture_region("chart").is_ok());
        assert!(matches!(
            source.capture_region("other"),
            Err(Error::SourceNotFound(ref r)) if r == "other"
        ));
        assert!(matches!(
            source.resolve_asset("logo"),
            Err(Error::AssetResolution(_))
        ));
    }

    #[test]
    fn test_closure_source() {
        let source = |region: &str| {
            if region == "ok" {
                RasterImage::solid(1, 1, [0, 0, 0])
            } else {
                Err(Error::RasterCapture("canvas tainted".into()))
            }
        };
        assert!(source.capture_region("ok").is_ok());
        assert!(matches!(
            source.capture_region("bad"),
            Err(Error::RasterCapture(_))
        ));
    }

    #[test]
    fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("chart.png"), png_bytes(4, 3)).unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not an image").unwrap();
        let source = FileRasterSource::new(dir.path());

        let image = source.capture_region("chart.png").unwrap();
        assert_eq!((image.width, image.height), (4, 3));
        assert_eq!(&image.pixels[..3], &[10, 200, 30]);

        assert!(matches!(
            source.capture_region("missing.png"),
            Err(Error::SourceNotFound(_))
        ));
        assert!(matches!(
            source.capture_region("broken.png"),
            Err(Error::RasterCapture(_))
        ));
        assert!(matches!(
            source.resolve_asset("missing.png"),
            Err(Error::AssetResolution(_))
        ));
    }

    #[test]
    fn test_resolve_logo_downgrades_failures() {
        let source = MemoryRasterSource::new().with("logo", RasterImage::solid(2, 1, [0, 0, 0]).unwrap());
        assert!(resolve_logo(Some(&source), Some("logo")).is_some());
        assert!(resolve_logo(Some(&source), Some("nope")).is_none());
        assert!(resolve_logo(None, Some("logo")).is_none());
        assert!(resolve_logo(Some(&source), None).is_none());
        assert!(resolve_logo(Some(&source), Some("  ")).is_none());
    }

    #[cfg(feature = "async")]
    #[test]
    fn test_capture_file_async() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        std::fs::write(&path, png_bytes(2, 2)).unwrap();

        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let image = rt.block_on(capture_file_async(&path)).unwrap();
        assert_eq!(image.width, 2);
        let missing = rt.block_on(capture_file_async(dir.path().join("none.png")));
        assert!(matches!(missing, Err(Error::SourceNotFound(_))));
    }
}
