//! Error types for plandoc library.

use std::io;
use thiserror::Error;

/// Result type alias for plandoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while composing an export.
#[derive(Error, Debug)]
pub enum Error {
    /// The caller's plan does not include exports.
    #[error("export not available on your plan - upgrade to unlock")]
    PermissionDenied,

    /// The referenced content region does not exist.
    #[error("Content source not found: {0}")]
    SourceNotFound(String),

    /// The raster capture dependency failed.
    #[error("Raster capture failed: {0}")]
    RasterCapture(String),

    /// A branding asset (logo) could not be resolved.
    #[error("Asset could not be resolved: {0}")]
    AssetResolution(String),

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error building or serializing the PDF object graph.
    #[error("PDF writing error: {0}")]
    Pdf(String),

    /// Encoded image bytes could not be decoded.
    #[error("Image decoding error: {0}")]
    ImageDecode(String),

    /// Raw raster data does not match its declared dimensions.
    #[error("Invalid raster: {0}")]
    InvalidRaster(String),

    /// Input data or options could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error during rendering (layout dump, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the error aborts an export.
    ///
    /// Only asset resolution failures are recoverable; the pipeline downgrades
    /// them to text-only branding.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::AssetResolution(_))
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageDecode(err.to_string())
    }
}
