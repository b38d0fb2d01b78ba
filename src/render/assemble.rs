//! Document assembly: cover, sections, watermark and footer passes.

use super::normalize::TextNormalizer;
use super::options::ExportOptions;
use super::sections::{self, Flowable, RasterFlow, RasterInfo, RenderContext, TextLine};
use super::style::{self, TextStyle};
use super::watermark::{self, LogoRef, Watermark};
use super::ExportStats;
use crate::content::{build_sections, ContentBlock, Section, SectionKind, Tone};
use crate::error::Result;
use crate::layout::{place, text_width, wrap_text, Cursor, Extent, PageGeometry, Placement};
use crate::model::{Document, DrawOp, Metadata, Page, RasterImage, StrategicPlanData};
use chrono::{NaiveTime, TimeZone, Utc};
use std::collections::HashMap;

/// Export pipeline stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Nothing done yet
    Idle,
    /// Building the content model and capturing rasters
    BuildingSections,
    /// Placing flowables on pages
    Paginating,
    /// Stamping watermarks
    Watermarking,
    /// Writing footers and statistics
    Finalizing,
    /// Document ready
    Done,
}

/// Places flowables on pages.
///
/// Owns the page list and the cursor; every page break goes through
/// [`place`].
#[derive(Debug, Clone)]
pub struct Paginator {
    geometry: PageGeometry,
    pages: Vec<Page>,
    cursor: Cursor,
    stats: ExportStats,
}

impl Paginator {
    /// Create a paginator with no pages.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            cursor: Cursor::top(0, &geometry),
            stats: ExportStats::new(),
        }
    }

    /// Page geometry.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Current cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Pages produced so far.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Move to the top of a fresh page, reusing the current one if nothing
    /// was drawn on it.
    pub fn start_page(&mut self) {
        let reuse = self.pages.last().map(Page::is_empty).unwrap_or(false);
        if !reuse {
            let number = self.pages.len() as u32 + 1;
            self.pages
                .push(Page::new(number, self.geometry.width, self.geometry.height));
        }
        self.cursor = Cursor::top(self.pages.len() as u32, &self.geometry);
    }

    fn break_page(&mut self) {
        self.stats.add_overflow_break();
        self.start_page();
        log::debug!("Page break, continuing on page {}", self.cursor.page);
    }

    fn current(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.start_page();
        }
        let idx = self.pages.len() - 1;
        &mut self.pages[idx]
    }

    /// Place a flowable at the cursor, breaking pages as needed.
    pub fn push(&mut self, flowable: Flowable) {
        if self.pages.is_empty() {
            self.start_page();
        }
        match flowable {
            Flowable::Text(flow) => self.push_lines(flow.lines),
            Flowable::Raster(raster) => self.push_raster(&raster),
        }
    }

    fn push_lines(&mut self, mut lines: Vec<TextLine>) {
        loop {
            let extent = Extent::Lines(lines.iter().map(|l| l.height).collect());
            match place(self.cursor, &extent, &self.geometry) {
                Placement::Fits { y, cursor } => {
                    self.draw_lines(&lines, y);
                    self.cursor = cursor;
                    return;
                }
                Placement::NewPage => self.break_page(),
                Placement::Split { y, head, .. } => {
                    let rest = lines.split_off(head.line_count());
                    self.draw_lines(&lines, y);
                    lines = rest;
                    self.break_page();
                }
            }
        }
    }

    fn push_raster(&mut self, raster: &RasterFlow) {
        if !raster.lead.is_empty() {
            self.push_lead(&raster.lead, raster.height);
        }
        let total = raster.height;
        let mut offset = 0.0;
        loop {
            let extent = Extent::Raster(total - offset);
            match place(self.cursor, &extent, &self.geometry) {
                Placement::Fits { y, cursor } => {
                    self.draw_strip(raster, offset, total, y);
                    self.cursor = cursor;
                    return;
                }
                Placement::NewPage => self.break_page(),
                Placement::Split { y, head, .. } => {
                    let h = head.height();
                    self.draw_strip(raster, offset, offset + h, y);
                    offset += h;
                    self.break_page();
                }
            }
        }
    }

    /// Place heading lines only where the raster below them can start on the
    /// same page.
    fn push_lead(&mut self, lines: &[TextLine], raster_height: f32) {
        let extent = Extent::Lines(lines.iter().map(|l| l.height).collect());
        if let Placement::Fits { y, cursor } = place(self.cursor, &extent, &self.geometry) {
            let below = place(cursor, &Extent::Raster(raster_height), &self.geometry);
            if below != Placement::NewPage {
                self.draw_lines(lines, y);
                self.cursor = cursor;
                return;
            }
        }
        if !self.cursor.at_top(&self.geometry) {
            self.break_page();
        }
        self.push_lines(lines.to_vec());
    }

    fn draw_lines(&mut self, lines: &[TextLine], top: f32) {
        let left = self.geometry.content_left();
        let right = left + self.geometry.content_width();
        let count = lines.len();
        let page = self.current();
        let mut y = top;
        for line in lines {
            page.push(DrawOp::text(
                left + line.x,
                y + line.baseline,
                line.text.clone(),
                line.style.font,
                line.style.size,
                line.style.color,
            ));
            if let Some(offset) = line.rule_below {
                page.push(DrawOp::rule(
                    left,
                    y + offset,
                    right,
                    y + offset,
                    style::ACCENT,
                    style::RULE_WIDTH,
                ));
            }
            y += line.height;
        }
        self.stats.add_lines(count);
    }

    fn draw_strip(&mut self, raster: &RasterFlow, from: f32, to: f32, top: f32) {
        if raster.height <= 0.0 || to <= from {
            return;
        }
        let px = raster.pixel_height;
        let row = |v: f32| ((v / raster.height * px as f32).round() as u32).min(px);
        let row_start = row(from);
        let mut row_end = row(to);
        if row_end <= row_start {
            if row_start >= px {
                return;
            }
            row_end = row_start + 1;
        }
        let left = self.geometry.content_left() + raster.x;
        self.current().push(DrawOp::Image {
            x: left,
            y: top,
            width: raster.width,
            height: to - from,
            image: raster.image,
            row_start,
            row_end,
            opacity: 1.0,
        });
        self.stats.add_strip();
    }

    /// Draw one centered line with its baseline at `baseline`.
    fn centered(&mut self, text: &str, style: TextStyle, baseline: f32) {
        let width = text_width(text, style.font, style.size);
        let x = (self.geometry.width - width) / 2.0;
        self.current().push(DrawOp::text(
            x,
            baseline,
            text,
            style.font,
            style.size,
            style.color,
        ));
        self.stats.add_lines(1);
    }

    /// Hand over the pages and the statistics collected while placing.
    pub fn finish(self) -> (Vec<Page>, ExportStats) {
        (self.pages, self.stats)
    }
}

/// Composes a [`Document`] from sections or a single captured region.
pub struct Assembler<'a> {
    options: &'a ExportOptions,
    geometry: PageGeometry,
    normalizer: TextNormalizer,
    stage: Stage,
    document: Document,
    rasters: HashMap<String, RasterInfo>,
    logo: Option<LogoRef>,
}

impl<'a> Assembler<'a> {
    /// Create an assembler; refuses when the export is not permitted.
    pub fn new(options: &'a ExportOptions) -> Result<Self> {
        options.ensure_exportable()?;
        let mut metadata = Metadata::with_title(options.effective_title());
        metadata.author = options.author.clone();
        metadata.creator = Some("plandoc".to_string());
        metadata.producer = Some(format!("plandoc {}", env!("CARGO_PKG_VERSION")));
        metadata.created = Some(match options.date {
            Some(date) => Utc.from_utc_datetime(&date.and_time(NaiveTime::default())),
            None => Utc::now(),
        });

        let mut document = Document::new(metadata);
        document.filename = options.filename.clone();

        Ok(Self {
            options,
            geometry: options.geometry(),
            normalizer: TextNormalizer::new()?,
            stage: Stage::Idle,
            document,
            rasters: HashMap::new(),
            logo: None,
        })
    }

    /// Current pipeline stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn enter(&mut self, next: Stage) {
        log::debug!("Export stage {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }

    /// Register a captured raster under its region reference.
    ///
    /// Fails with [`Error::InvalidRaster`] when the image size does not
    /// match its pixel buffer.
    pub fn add_raster(&mut self, region: impl Into<String>, image: RasterImage) -> Result<()> {
        image.validate()?;
        let info = RasterInfo {
            image: self.document.add_image(image.clone()),
            width: image.width,
            height: image.height,
        };
        self.document.stats.add_image();
        self.rasters.insert(region.into(), info);
        Ok(())
    }

    /// Check if a region has been registered.
    pub fn has_raster(&self, region: &str) -> bool {
        self.rasters.contains_key(region)
    }

    /// Register the resolved company logo.
    pub fn set_logo(&mut self, image: RasterImage) -> Result<()> {
        image.validate()?;
        let logo = LogoRef {
            image: self.document.add_image(image.clone()),
            width: image.width,
            height: image.height,
        };
        self.document.stats.add_image();
        self.logo = Some(logo);
        Ok(())
    }

    /// Build sections from plan data, capture their raster regions through
    /// `capture` and compose the document.
    pub fn assemble_plan(
        mut self,
        data: &StrategicPlanData,
        capture: &mut dyn FnMut(&str) -> Result<RasterImage>,
    ) -> Result<Document> {
        self.enter(Stage::BuildingSections);
        self.document.metadata.subject = Some(data.company.name.trim().to_string());
        let sections = build_sections(data);
        log::debug!("Built {} sections", sections.len());

        for region in sections.iter().flat_map(Section::raster_regions) {
            if !self.has_raster(region) {
                let image = capture(region)?;
                log::debug!(
                    "Captured region '{}' ({}x{})",
                    region,
                    image.width,
                    image.height
                );
                self.add_raster(region, image)?;
            }
        }

        self.assemble_sections(&sections)
    }

    /// Compose the document from prebuilt sections. Every raster region they
    /// reference must already be registered.
    pub fn assemble_sections(mut self, sections: &[Section]) -> Result<Document> {
        if self.stage < Stage::BuildingSections {
            self.enter(Stage::BuildingSections);
        }
        self.enter(Stage::Paginating);
        let mut pager = Paginator::new(self.geometry);

        for section in sections {
            log::debug!("Rendering section {:?}", section.kind);
            if section.kind == SectionKind::Cover {
                self.draw_cover(&mut pager, section);
            } else {
                let ctx = RenderContext {
                    geometry: self.geometry,
                    normalizer: &self.normalizer,
                    rasters: &self.rasters,
                };
                let flowables = sections::render_section(section, &ctx)?;
                pager.start_page();
                for flowable in flowables {
                    pager.push(flowable);
                }
            }
            self.document.stats.add_section();
        }

        self.finish(pager)
    }

    /// Compose a single captured region under a title header, without a
    /// cover page.
    pub fn assemble_region(mut self, region: &str, image: RasterImage) -> Result<Document> {
        self.enter(Stage::BuildingSections);
        self.add_raster(region, image)?;
        let block = ContentBlock::RasterRegion {
            region: region.to_string(),
            caption: None,
        };

        self.enter(Stage::Paginating);
        let ctx = RenderContext {
            geometry: self.geometry,
            normalizer: &self.normalizer,
            rasters: &self.rasters,
        };
        let header = sections::header_flow(
            self.options.effective_title(),
            self.options.subtitle.as_deref(),
            &ctx,
        );
        let body = sections::render_block(&block, &ctx)?;

        let mut pager = Paginator::new(self.geometry);
        pager.start_page();
        pager.push(Flowable::Text(header));
        for flowable in body {
            pager.push(flowable);
        }
        self.document.stats.add_section();

        self.finish(pager)
    }

    fn draw_cover(&self, pager: &mut Paginator, cover: &Section) {
        pager.start_page();
        let g = self.geometry;
        let max_width = g.content_width();

        if let Some(logo) = self.logo {
            let (w, h) = logo.fit(160.0, 80.0);
            if w > 0.0 && h > 0.0 {
                pager.current().push(DrawOp::Image {
                    x: (g.width - w) / 2.0,
                    y: g.content_top() + 40.0,
                    width: w,
                    height: h,
                    image: logo.image,
                    row_start: 0,
                    row_end: logo.height,
                    opacity: 1.0,
                });
            }
        }

        let company = cover.blocks.iter().find_map(|b| match b {
            ContentBlock::Heading { text, .. } => Some(text.as_str()),
            _ => None,
        });
        let sector = cover.blocks.iter().find_map(|b| match b {
            ContentBlock::Paragraph {
                text,
                tone: Tone::Muted,
            } => Some(text.as_str()),
            _ => None,
        });

        let mut baseline = g.height * 0.38;
        let title = self.normalizer.normalize_drawable(self.options.effective_title());
        let title_style = style::COVER_TITLE;
        for line in wrap_text(&title, title_style.font, title_style.size, max_width) {
            pager.centered(&line, title_style, baseline);
            baseline += title_style.line_height();
        }

        baseline += 8.0;
        let subtitle = self
            .options
            .subtitle
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(company);
        if let Some(subtitle) = subtitle {
            let text = self.normalizer.normalize_drawable(subtitle);
            let sub_style = style::COVER_SUBTITLE;
            for line in wrap_text(&text, sub_style.font, sub_style.size, max_width) {
                pager.centered(&line, sub_style, baseline);
                baseline += sub_style.line_height();
            }
        }

        let rule_y = baseline;
        pager.current().push(DrawOp::rule(
            g.width / 2.0 - 60.0,
            rule_y,
            g.width / 2.0 + 60.0,
            rule_y,
            style::ACCENT,
            style::RULE_WIDTH * 1.5,
        ));
        baseline += 28.0;

        let detail = style::COVER_DETAIL;
        let mut details: Vec<&str> = Vec::new();
        if subtitle != company {
            details.extend(company);
        }
        details.extend(sector);
        for text in details {
            let text = self.normalizer.normalize_drawable(text);
            for line in wrap_text(&text, detail.font, detail.size, max_width) {
                pager.centered(&line, detail, baseline);
                baseline += detail.line_height();
            }
        }

        let date = self
            .options
            .effective_date()
            .format(style::DATE_FORMAT)
            .to_string();
        pager.centered(&date, detail, baseline + 8.0);
    }

    fn finish(mut self, pager: Paginator) -> Result<Document> {
        let (mut pages, layout_stats) = pager.finish();
        pages.retain(|p| !p.is_empty());
        for (i, page) in pages.iter_mut().enumerate() {
            page.number = i as u32 + 1;
        }

        self.enter(Stage::Watermarking);
        let mut watermarked = 0;
        if self.options.watermark {
            let text = self
                .normalizer
                .normalize_drawable(self.options.effective_watermark_text());
            let mark = Watermark::text(text).with_logo(self.logo);
            watermarked = watermark::stamp_all(&mut pages, &mark);
        }

        self.enter(Stage::Finalizing);
        apply_footers(&mut pages, &self.geometry);

        let mut stats = layout_stats;
        stats.merge(&self.document.stats);
        stats.page_count = pages.len() as u32;
        stats.watermarked_pages = watermarked;
        self.document.stats = stats;
        self.document.pages = pages;

        self.enter(Stage::Done);
        log::debug!(
            "Export done: {} pages, {} strips",
            self.document.page_count(),
            self.document.stats.strip_count
        );
        Ok(self.document)
    }
}

/// Footer text for page `number` of `total`.
pub fn footer_label(number: u32, total: u32) -> String {
    format!("{} / {}", number, total)
}

/// Replace every page footer with `"<i> / <N>"` and the attribution line.
pub fn apply_footers(pages: &mut [Page], geometry: &PageGeometry) {
    let total = pages.len() as u32;
    let footer = style::FOOTER;
    let baseline = geometry.footer_baseline();
    let left = geometry.content_left();
    let right = left + geometry.content_width();

    for page in pages.iter_mut() {
        let label = footer_label(page.number, total);
        let width = text_width(&label, footer.font, footer.size);
        page.footer = vec![
            DrawOp::text(
                left,
                baseline,
                style::ATTRIBUTION,
                footer.font,
                footer.size,
                footer.color,
            ),
            DrawOp::text(
                right - width,
                baseline,
                label,
                footer.font,
                footer.size,
                footer.color,
            ),
        ];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BulletItem;
    use crate::error::Error;
    use crate::layout::Orientation;
    use crate::model::{ImageId, ObjectiveSummary};
    use crate::render::sections::TextFlow;

    fn allowed() -> ExportOptions {
        ExportOptions::new()
            .with_export_permission(true)
            .with_date(chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    fn no_capture() -> impl FnMut(&str) -> Result<RasterImage> {
        |region: &str| Err(Error::SourceNotFound(region.to_string()))
    }

    fn line(height: f32) -> TextLine {
        TextLine {
            x: 0.0,
            text: "x".into(),
            style: style::BODY,
            height,
            baseline: height * 0.8,
            rule_below: None,
        }
    }

    #[test]
    fn test_assembler_refuses_without_permission() {
        let options = ExportOptions::default();
        assert!(matches!(
            Assembler::new(&options).err(),
            Some(Error::PermissionDenied)
        ));
    }

    #[test]
    fn test_minimal_plan_pages() {
        let options = allowed();
        let data = StrategicPlanData::new("Acme");
        let doc = Assembler::new(&options)
            .unwrap()
            .assemble_plan(&data, &mut no_capture())
            .unwrap();
        assert_eq!(doc.page_count(), 2);
        assert!(doc.pages[0].plain_text().contains("Acme"));
        assert!(doc.pages[0].plain_text().contains("01/06/2025"));
        assert!(doc.pages[1].plain_text().contains("Sumário Executivo"));
        assert_eq!(doc.stats.section_count, 2);
    }

    #[test]
    fn test_footers_number_every_page() {
        let options = allowed();
        let mut data = StrategicPlanData::new("Acme");
        data.objectives = Some(vec![ObjectiveSummary::default()]);
        let doc = Assembler::new(&options)
            .unwrap()
            .assemble_plan(&data, &mut no_capture())
            .unwrap();
        let n = doc.page_count();
        for page in &doc.pages {
            let labels: Vec<&str> = page.footer.iter().filter_map(DrawOp::as_text).collect();
            let label = footer_label(page.number, n);
            assert_eq!(labels, vec![style::ATTRIBUTION, label.as_str()]);
        }
    }

    #[test]
    fn test_sections_start_on_fresh_pages() {
        let options = allowed();
        let mut data = StrategicPlanData::new("Acme");
        data.okrs = Some(vec![]);
        data.insights = Some(vec![]);
        let doc = Assembler::new(&options)
            .unwrap()
            .assemble_plan(&data, &mut no_capture())
            .unwrap();
        assert_eq!(doc.page_count(), 4);
        assert!(doc.pages[2].plain_text().starts_with("OKRs"));
        assert!(doc.pages[3].plain_text().starts_with("Insights de IA"));
    }

    #[test]
    fn test_missing_capture_aborts() {
        let options = allowed();
        let mut data = StrategicPlanData::new("Acme");
        data.bsc = Some(Default::default());
        data.charts = vec![crate::model::ChartRef {
            section: "bsc".into(),
            region: "radar".into(),
            caption: None,
        }];
        let err = Assembler::new(&options)
            .unwrap()
            .assemble_plan(&data, &mut no_capture())
            .unwrap_err();
        assert!(matches!(err, Error::SourceNotFound(ref r) if r == "radar"));
    }

    #[test]
    fn test_region_mode_has_no_cover() {
        let options = allowed().with_title("Painel").with_subtitle("Q1");
        let image = RasterImage::solid(100, 50, [10, 20, 30]).unwrap();
        let doc = Assembler::new(&options)
            .unwrap()
            .assemble_region("dashboard", image)
            .unwrap();
        assert_eq!(doc.page_count(), 1);
        let text = doc.pages[0].plain_text();
        assert!(text.starts_with("Painel\nQ1"));
        assert!(doc.pages[0].ops.iter().any(DrawOp::is_image));
    }

    #[test]
    fn test_tall_region_is_sliced_without_loss() {
        let options = allowed().with_orientation(Orientation::Portrait);
        let geom = options.geometry();
        // Drawn at content width this is about 3.3 content heights tall.
        let width = 100;
        let height = (geom.content_height() * 3.3 / geom.content_width() * width as f32) as u32;
        let image = RasterImage::solid(width, height, [0, 0, 0]).unwrap();
        let doc = Assembler::new(&options)
            .unwrap()
            .assemble_region("long", image)
            .unwrap();

        let strips: Vec<(u32, u32)> = doc
            .pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter_map(|op| match op {
                DrawOp::Image {
                    row_start, row_end, ..
                } => Some((*row_start, *row_end)),
                _ => None,
            })
            .collect();
        assert!(strips.len() >= 4);
        assert_eq!(strips[0].0, 0);
        assert_eq!(strips.last().unwrap().1, height);
        for pair in strips.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        assert_eq!(doc.stats.strip_count as usize, strips.len());
    }

    #[test]
    fn test_paginator_reuses_empty_page() {
        let mut pager = Paginator::new(PageGeometry::default());
        pager.start_page();
        pager.start_page();
        assert_eq!(pager.pages().len(), 1);
        pager.push(Flowable::Text(TextFlow {
            lines: vec![line(12.0)],
            keep_with_next: false,
        }));
        pager.start_page();
        assert_eq!(pager.pages().len(), 2);
    }

    #[test]
    fn test_paginator_splits_tall_text() {
        let geom = PageGeometry::default();
        let mut pager = Paginator::new(geom);
        let count = (geom.content_height() / 12.0) as usize * 2 + 5;
        pager.push(Flowable::Text(TextFlow {
            lines: vec![line(12.0); count],
            keep_with_next: false,
        }));
        let (pages, stats) = pager.finish();
        assert_eq!(pages.len(), 3);
        let drawn: usize = pages.iter().map(|p| p.ops.len()).sum();
        assert_eq!(drawn, count);
        assert_eq!(stats.text_line_count as usize, count);
    }

    #[test]
    fn test_paginator_strip_rows_cover_image() {
        let geom = PageGeometry::default();
        let mut pager = Paginator::new(geom);
        let bullet = Flowable::Text(TextFlow {
            lines: vec![line(100.0)],
            keep_with_next: false,
        });
        pager.push(bullet);
        pager.push(Flowable::Raster(RasterFlow {
            region: "r".into(),
            image: ImageId(0),
            x: 0.0,
            width: geom.content_width(),
            height: geom.content_height() * 1.5,
            pixel_height: 999,
            lead: Vec::new(),
        }));
        let (pages, _) = pager.finish();
        assert_eq!(pages.len(), 2);
        let rows: Vec<(u32, u32)> = pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter_map(|op| match op {
                DrawOp::Image {
                    row_start, row_end, ..
                } => Some((*row_start, *row_end)),
                _ => None,
            })
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, 0);
        assert_eq!(rows[0].1, rows[1].0);
        assert_eq!(rows[1].1, 999);
    }

    #[test]
    fn test_paginator_moves_heading_with_raster() {
        let geom = PageGeometry::default();
        let mut pager = Paginator::new(geom);
        // Leave room for the heading but not for a worthwhile strip.
        let filler = geom.content_height() - geom.block_spacing - 30.0;
        pager.push(Flowable::Text(TextFlow {
            lines: vec![line(filler)],
            keep_with_next: false,
        }));
        pager.push(Flowable::Raster(RasterFlow {
            region: "r".into(),
            image: ImageId(0),
            x: 0.0,
            width: geom.content_width(),
            height: geom.content_height() * 0.5,
            pixel_height: 400,
            lead: vec![line(14.0)],
        }));
        let (pages, _) = pager.finish();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].ops.len(), 1);
        assert!(pages[1].ops[0].as_text().is_some());
        assert!(pages[1].ops[1].is_image());
    }

    #[test]
    fn test_paginator_keeps_heading_when_strip_fits() {
        let geom = PageGeometry::default();
        let mut pager = Paginator::new(geom);
        pager.push(Flowable::Raster(RasterFlow {
            region: "r".into(),
            image: ImageId(0),
            x: 0.0,
            width: geom.content_width(),
            height: geom.content_height() * 2.0,
            pixel_height: 800,
            lead: vec![line(14.0)],
        }));
        let (pages, _) = pager.finish();

        assert_eq!(pages.len(), 3);
        assert!(pages[0].ops[0].as_text().is_some());
        assert!(pages[0].ops[1].is_image());
    }

    #[test]
    fn test_watermark_text_is_drawable() {
        let options = allowed().with_watermark_text(" DEMO\u{0007}\u{200B} 漢 ");
        let doc = Assembler::new(&options)
            .unwrap()
            .assemble_plan(&StrategicPlanData::new("Acme"), &mut no_capture())
            .unwrap();
        for page in &doc.pages {
            let stamps: Vec<&str> = page.stamp.iter().filter_map(DrawOp::as_text).collect();
            assert_eq!(stamps, vec!["DEMO ?"]);
        }
    }

    #[test]
    fn test_stage_order() {
        assert!(Stage::Idle < Stage::BuildingSections);
        assert!(Stage::Watermarking < Stage::Finalizing);
        let options = allowed();
        let assembler = Assembler::new(&options).unwrap();
        assert_eq!(assembler.stage(), Stage::Idle);
    }

    #[test]
    fn test_bullet_section_paginates() {
        let options = allowed();
        let mut section = Section::new(SectionKind::Insights);
        section.blocks.push(ContentBlock::BulletList {
            items: (0..200)
                .map(|i| BulletItem::new(format!("Item {}", i)))
                .collect(),
        });
        let sections = vec![section];
        let doc = Assembler::new(&options)
            .unwrap()
            .assemble_sections(&sections)
            .unwrap();
        assert!(doc.page_count() > 1);
        let text = doc.plain_text();
        assert!(text.contains("• Item 0"));
        assert!(text.contains("• Item 199"));
    }
}
