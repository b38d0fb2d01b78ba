//! # plandoc
//!
//! Strategic plan PDF composition and pagination engine.
//!
//! This library turns a company's strategic planning data (OGSM, OKRs,
//! balanced scorecard, prioritization matrix, PESTEL, 4DX cadence,
//! objectives and insights) into a paginated A4 PDF with a cover page,
//! page-numbered footers and an optional diagonal watermark.
//!
//! ## Quick Start
//!
//! ```no_run
//! use plandoc::{export_strategic_plan_to_pdf, ExportOptions, StrategicPlanData};
//!
//! fn main() -> plandoc::Result<()> {
//!     let data = StrategicPlanData::from_json(r#"{"company": {"name": "Acme"}}"#)?;
//!     let options = ExportOptions::new()
//!         .with_export_permission(true)
//!         .with_watermark_text("DEMO");
//!
//!     let doc = export_strategic_plan_to_pdf(&data, &options)?;
//!     std::fs::write(doc.suggested_filename(), doc.to_pdf_bytes()?)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Canonical sections**: cover, summary, then every present framework
//! - **Shared pagination**: one placement rule for text and raster blocks
//! - **Strip slicing**: tall chart captures flow across pages
//! - **Branding**: footers, attribution and low-opacity watermarks
//! - **Swappable capture**: charts come from any [`RasterSource`]

pub mod capture;
pub mod content;
pub mod error;
pub mod layout;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use capture::{
    resolve_logo, AssetSource, FileRasterSource, MemoryRasterSource, RasterSource,
};
pub use content::{build_sections, ContentBlock, Section, SectionKind};
pub use error::{Error, Result};
pub use layout::{Orientation, PageGeometry};
pub use model::{Document, Metadata, Page, RasterImage, StrategicPlanData};
pub use render::{Assembler, ExportOptions, ExportStats, JsonFormat, Stage};

#[cfg(feature = "async")]
pub use capture::capture_file_async;

/// Export a complete strategic plan.
///
/// Chart regions and the company logo are resolved as image files relative
/// to the working directory. Use [`Exporter`] to supply other sources.
///
/// # Errors
///
/// [`Error::PermissionDenied`] before any work when `options.can_export` is
/// false; [`Error::SourceNotFound`] or [`Error::RasterCapture`] when a chart
/// region cannot be captured. A logo that cannot be resolved is logged and
/// left out.
///
/// # Example
///
/// ```no_run
/// use plandoc::{export_strategic_plan_to_pdf, ExportOptions, StrategicPlanData};
///
/// let data = StrategicPlanData::new("Acme");
/// let options = ExportOptions::new().with_export_permission(true);
/// let doc = export_strategic_plan_to_pdf(&data, &options).unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn export_strategic_plan_to_pdf(
    data: &StrategicPlanData,
    options: &ExportOptions,
) -> Result<Document> {
    let files = FileRasterSource::current_dir();
    Exporter::new(options.clone())
        .with_raster_source(&files)
        .with_asset_source(&files)
        .export_plan(data)
}

/// Export a single captured content region under a title header.
///
/// # Example
///
/// ```no_run
/// use plandoc::{export_to_pdf, ExportOptions, FileRasterSource};
///
/// let source = FileRasterSource::new("./captures");
/// let options = ExportOptions::new()
///     .with_export_permission(true)
///     .with_title("Painel OKR");
/// let doc = export_to_pdf(&source, "okr-dashboard.png", &options).unwrap();
/// ```
pub fn export_to_pdf(
    source: &dyn RasterSource,
    content_ref: &str,
    options: &ExportOptions,
) -> Result<Document> {
    Exporter::new(options.clone())
        .with_raster_source(source)
        .export_region(content_ref)
}

/// Export a single content region whose capture is asynchronous.
///
/// The permission check runs before `capture` is invoked.
#[cfg(feature = "async")]
pub async fn export_to_pdf_async<F, Fut>(
    capture: F,
    content_ref: &str,
    options: &ExportOptions,
) -> Result<Document>
where
    F: FnOnce(String) -> Fut,
    Fut: std::future::Future<Output = Result<RasterImage>>,
{
    options.ensure_exportable()?;
    let image = capture(content_ref.to_string()).await?;
    Exporter::new(options.clone()).export_captured(content_ref, image)
}

/// Builder for export runs with explicit capture and asset sources.
///
/// # Example
///
/// ```no_run
/// use plandoc::{Exporter, ExportOptions, MemoryRasterSource, RasterImage, StrategicPlanData};
///
/// let charts = MemoryRasterSource::new()
///     .with("chart-bsc", RasterImage::solid(800, 600, [30, 90, 160])?);
/// let doc = Exporter::new(ExportOptions::new().with_export_permission(true))
///     .with_raster_source(&charts)
///     .export_plan(&StrategicPlanData::new("Acme"))?;
/// # Ok::<(), plandoc::Error>(())
/// ```
pub struct Exporter<'a> {
    options: ExportOptions,
    rasters: Option<&'a dyn RasterSource>,
    assets: Option<&'a dyn AssetSource>,
}

impl<'a> Exporter<'a> {
    /// Create an exporter without sources.
    pub fn new(options: ExportOptions) -> Self {
        Self {
            options,
            rasters: None,
            assets: None,
        }
    }

    /// Capture chart and content regions from `source`.
    pub fn with_raster_source(mut self, source: &'a dyn RasterSource) -> Self {
        self.rasters = Some(source);
        self
    }

    /// Resolve the company logo from `source`.
    pub fn with_asset_source(mut self, source: &'a dyn AssetSource) -> Self {
        self.assets = Some(source);
        self
    }

    /// Options of this export.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export a strategic plan.
    pub fn export_plan(&self, data: &StrategicPlanData) -> Result<Document> {
        let assembler = self.assembler()?;
        let rasters = self.rasters;
        let mut capture = |region: &str| match rasters {
            Some(source) => source.capture_region(region),
            None => Err(Error::SourceNotFound(region.to_string())),
        };
        assembler.assemble_plan(data, &mut capture)
    }

    /// Capture `content_ref` and export it as a single region.
    pub fn export_region(&self, content_ref: &str) -> Result<Document> {
        self.options.ensure_exportable()?;
        let source = self
            .rasters
            .ok_or_else(|| Error::SourceNotFound(content_ref.to_string()))?;
        let image = source.capture_region(content_ref)?;
        self.export_captured(content_ref, image)
    }

    /// Export an already captured region.
    pub fn export_captured(&self, content_ref: &str, image: RasterImage) -> Result<Document> {
        self.assembler()?.assemble_region(content_ref, image)
    }

    fn assembler(&self) -> Result<Assembler<'_>> {
        let mut assembler = Assembler::new(&self.options)?;
        if let Some(logo) = resolve_logo(self.assets, self.options.company_logo_ref.as_deref()) {
            if let Err(e) = assembler.set_logo(logo) {
                log::warn!("Skipping company logo: {}", e);
            }
        }
        Ok(assembler)
    }
}
