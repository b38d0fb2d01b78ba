//! Export options and configuration.

use crate::error::{Error, Result};
use crate::layout::{Orientation, PageGeometry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default document title.
pub const DEFAULT_TITLE: &str = "Planejamento Estratégico";

/// Default watermark text.
pub const DEFAULT_WATERMARK_TEXT: &str = "AMOSTRA";

/// Options for one export call.
///
/// Deserializes from the camelCase keys the product stores as well as from
/// snake_case; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Output file name hint for the caller's save step
    pub filename: Option<String>,

    /// Document title drawn on the cover and the single-region header
    pub title: String,

    /// Optional subtitle; the cover falls back to the company name
    pub subtitle: Option<String>,

    /// Page orientation (A4 in both cases)
    pub orientation: Orientation,

    /// Stamp every page with a translucent watermark
    pub watermark: bool,

    /// Watermark text
    #[serde(alias = "watermarkText")]
    pub watermark_text: String,

    /// Reference to the company logo, resolved by the asset source
    #[serde(alias = "companyLogoRef", alias = "companyLogo")]
    pub company_logo_ref: Option<String>,

    /// Entitlement flag; exports are refused unless set
    #[serde(alias = "canExport")]
    pub can_export: bool,

    /// Cover date; defaults to today
    pub date: Option<NaiveDate>,

    /// Author written to the document metadata
    pub author: Option<String>,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file name hint.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Set the page orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Switch to landscape pages.
    pub fn landscape(self) -> Self {
        self.with_orientation(Orientation::Landscape)
    }

    /// Enable or disable the watermark.
    pub fn with_watermark(mut self, enabled: bool) -> Self {
        self.watermark = enabled;
        self
    }

    /// Enable the watermark with the given text.
    pub fn with_watermark_text(mut self, text: impl Into<String>) -> Self {
        self.watermark = true;
        self.watermark_text = text.into();
        self
    }

    /// Set the logo reference.
    pub fn with_logo(mut self, logo_ref: impl Into<String>) -> Self {
        self.company_logo_ref = Some(logo_ref.into());
        self
    }

    /// Set the entitlement flag.
    pub fn with_export_permission(mut self, allowed: bool) -> Self {
        self.can_export = allowed;
        self
    }

    /// Set the cover date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Parse options from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Refuse the export unless the entitlement flag is set.
    pub fn ensure_exportable(&self) -> Result<()> {
        if self.can_export {
            Ok(())
        } else {
            Err(Error::PermissionDenied)
        }
    }

    /// Page geometry for the configured orientation.
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::a4(self.orientation)
    }

    /// Watermark text with the default applied to blank values.
    pub fn effective_watermark_text(&self) -> &str {
        let text = self.watermark_text.trim();
        if text.is_empty() {
            DEFAULT_WATERMARK_TEXT
        } else {
            text
        }
    }

    /// Title with the default applied to blank values.
    pub fn effective_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            DEFAULT_TITLE
        } else {
            title
        }
    }

    /// Cover date, today when unset.
    pub fn effective_date(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            filename: None,
            title: DEFAULT_TITLE.to_string(),
            subtitle: None,
            orientation: Orientation::Portrait,
            watermark: false,
            watermark_text: DEFAULT_WATERMARK_TEXT.to_string(),
            company_logo_ref: None,
            can_export: false,
            date: None,
            author: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::default();
        assert!(!options.can_export);
        assert!(!options.watermark);
        assert_eq!(options.title, DEFAULT_TITLE);
        assert_eq!(options.orientation, Orientation::Portrait);
    }

    #[test]
    fn test_builder() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let options = ExportOptions::new()
            .with_title("Plano 2025")
            .with_watermark_text("DEMO")
            .with_export_permission(true)
            .with_date(date)
            .landscape();

        assert!(options.watermark);
        assert_eq!(options.effective_watermark_text(), "DEMO");
        assert_eq!(options.effective_date(), date);
        assert!(options.geometry().is_landscape());
        assert!(options.ensure_exportable().is_ok());
    }

    #[test]
    fn test_permission_denied() {
        let err = ExportOptions::default().ensure_exportable().unwrap_err();
        assert!(matches!(err, Error::PermissionDenied));
    }

    #[test]
    fn test_from_json_camel_case() {
        let json = r#"{
            "title": "Plano",
            "orientation": "landscape",
            "watermark": true,
            "watermarkText": "DEMO",
            "canExport": true,
            "companyLogoRef": "logo.png",
            "date": "2025-01-31"
        }"#;
        let options = ExportOptions::from_json(json).unwrap();
        assert_eq!(options.orientation, Orientation::Landscape);
        assert_eq!(options.watermark_text, "DEMO");
        assert!(options.can_export);
        assert_eq!(options.company_logo_ref.as_deref(), Some("logo.png"));
        assert_eq!(options.date, NaiveDate::from_ymd_opt(2025, 1, 31));
        assert!(options.subtitle.is_none());
    }

    #[test]
    fn test_blank_values_fall_back() {
        let options = ExportOptions::new().with_title("  ");
        assert_eq!(options.effective_title(), DEFAULT_TITLE);
        let options = ExportOptions {
            watermark_text: String::new(),
            ..Default::default()
        };
        assert_eq!(options.effective_watermark_text(), DEFAULT_WATERMARK_TEXT);
    }
}
