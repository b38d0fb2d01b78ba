//! Section renderers: content blocks to flowables.
//!
//! Renderers measure and wrap text against the content width but never decide
//! where a page ends. Every flowable they return goes through
//! [`place`](crate::layout::place) in the pager.

use super::normalize::TextNormalizer;
use super::style::{self, TextStyle};
use crate::content::{BulletItem, ContentBlock, HeadingLevel, Section, Tone};
use crate::error::{Error, Result};
use crate::layout::{text_width, wrap_text, PageGeometry};
use crate::model::ImageId;
use std::collections::HashMap;

/// One laid out line of text, relative to its flowable.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Offset from the left edge of the content area
    pub x: f32,
    /// Normalized text
    pub text: String,
    /// Typography
    pub style: TextStyle,
    /// Height of the line box
    pub height: f32,
    /// Baseline offset from the top of the line box
    pub baseline: f32,
    /// Accent rule offset from the top of the line box
    pub rule_below: Option<f32>,
}

/// A block of lines that may only be split between lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFlow {
    /// Lines in reading order
    pub lines: Vec<TextLine>,
    /// Glue this flow to the flowable after it
    pub keep_with_next: bool,
}

impl TextFlow {
    fn new(lines: Vec<TextLine>) -> Self {
        Self {
            lines,
            keep_with_next: false,
        }
    }
}

/// A captured region drawn at content width.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterFlow {
    /// Region reference
    pub region: String,
    /// Image in the document registry
    pub image: ImageId,
    /// Offset from the left edge of the content area
    pub x: f32,
    /// Drawn width
    pub width: f32,
    /// Drawn height
    pub height: f32,
    /// Source height in pixels
    pub pixel_height: u32,
    /// Heading lines that must share a page with the top of the raster
    pub lead: Vec<TextLine>,
}

/// Unit handed to the pager.
#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    /// Text lines
    Text(TextFlow),
    /// A raster block, sliced into strips when taller than a page
    Raster(RasterFlow),
}

/// A captured raster registered with the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterInfo {
    /// Image in the document registry
    pub image: ImageId,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl RasterInfo {
    /// Height in points when drawn at `width` points, preserving aspect ratio.
    pub fn scaled_height(&self, width: f32) -> f32 {
        if self.width == 0 {
            return 0.0;
        }
        width * self.height as f32 / self.width as f32
    }
}

/// Inputs shared by every renderer.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Page geometry
    pub geometry: PageGeometry,
    /// Text normalizer
    pub normalizer: &'a TextNormalizer,
    /// Captured rasters by region reference
    pub rasters: &'a HashMap<String, RasterInfo>,
}

impl RenderContext<'_> {
    fn width(&self) -> f32 {
        self.geometry.content_width()
    }
}

/// Render a section into flowables, headings glued to what follows them.
pub fn render_section(section: &Section, ctx: &RenderContext<'_>) -> Result<Vec<Flowable>> {
    let mut flowables = Vec::new();
    for block in &section.blocks {
        flowables.extend(render_block(block, ctx)?);
    }
    Ok(keep_together(flowables))
}

/// Render one content block.
pub fn render_block(block: &ContentBlock, ctx: &RenderContext<'_>) -> Result<Vec<Flowable>> {
    let flowables = match block {
        ContentBlock::Heading { text, level } => {
            vec![Flowable::Text(heading_flow(text, *level, ctx))]
        }
        ContentBlock::Paragraph { text, tone } => {
            let style = match tone {
                Tone::Body => style::BODY,
                Tone::Muted => style::BODY_MUTED,
            };
            vec![Flowable::Text(TextFlow::new(lines(text, style, 0.0, ctx)))]
        }
        ContentBlock::BulletList { items } => items
            .iter()
            .map(|item| Flowable::Text(bullet_flow(item, ctx)))
            .collect(),
        ContentBlock::KeyValue { pairs } => pairs
            .iter()
            .map(|(label, value)| Flowable::Text(key_value_flow(label, value, ctx)))
            .collect(),
        ContentBlock::RasterRegion { region, caption } => raster_flows(region, caption, ctx)?,
    };

    Ok(flowables
        .into_iter()
        .filter(|f| !matches!(f, Flowable::Text(flow) if flow.lines.is_empty()))
        .collect())
}

/// Title block drawn above a single captured region.
pub fn header_flow(title: &str, subtitle: Option<&str>, ctx: &RenderContext<'_>) -> TextFlow {
    let mut flow = heading_flow(title, HeadingLevel::Section, ctx);
    if let Some(subtitle) = subtitle {
        let mut extra = lines(subtitle, style::BODY_MUTED, 0.0, ctx);
        flow.lines.append(&mut extra);
    }
    flow.keep_with_next = false;
    flow
}

fn heading_flow(text: &str, level: HeadingLevel, ctx: &RenderContext<'_>) -> TextFlow {
    let mut flow = match level {
        HeadingLevel::Section => {
            let style = style::SECTION_HEADING;
            let mut lines = lines(text, style, 0.0, ctx);
            if let Some(last) = lines.last_mut() {
                let offset = last.baseline + style.size * 0.25 + style::RULE_GAP;
                last.rule_below = Some(offset);
                last.height = offset + style::RULE_WIDTH + style::RULE_GAP;
            }
            TextFlow::new(lines)
        }
        HeadingLevel::Sub => {
            let mut lines = lines(text, style::SUB_HEADING, 0.0, ctx);
            if let Some(first) = lines.first_mut() {
                first.height += style::SUB_HEADING_GAP;
                first.baseline += style::SUB_HEADING_GAP;
            }
            TextFlow::new(lines)
        }
    };
    flow.keep_with_next = true;
    flow
}

fn bullet_flow(item: &BulletItem, ctx: &RenderContext<'_>) -> TextFlow {
    let mut out = hanging(
        &item.text,
        style::BULLET_MARK,
        style::BULLET,
        style::BULLET_INDENT,
        ctx,
    );
    for child in &item.children {
        out.extend(hanging(
            child,
            style::SUB_BULLET_MARK,
            style::SUB_BULLET,
            style::SUB_BULLET_INDENT,
            ctx,
        ));
    }
    TextFlow::new(out)
}

fn key_value_flow(label: &str, value: &str, ctx: &RenderContext<'_>) -> TextFlow {
    let mut out = lines(label, style::LABEL, 0.0, ctx);
    out.extend(lines(value, style::BODY, style::VALUE_INDENT, ctx));
    TextFlow::new(out)
}

fn raster_flows(
    region: &str,
    caption: &Option<String>,
    ctx: &RenderContext<'_>,
) -> Result<Vec<Flowable>> {
    let info = ctx
        .rasters
        .get(region)
        .ok_or_else(|| Error::SourceNotFound(region.to_string()))?;
    let width = ctx.width();
    let height = info.scaled_height(width);

    let mut flowables = vec![Flowable::Raster(RasterFlow {
        region: region.to_string(),
        image: info.image,
        x: 0.0,
        width,
        height,
        pixel_height: info.height,
        lead: Vec::new(),
    })];

    if let Some(caption) = caption {
        let mut caption_lines = lines(caption, style::CAPTION, 0.0, ctx);
        for line in &mut caption_lines {
            let w = text_width(&line.text, line.style.font, line.style.size);
            line.x = ((ctx.width() - w) / 2.0).max(0.0);
        }
        flowables.push(Flowable::Text(TextFlow::new(caption_lines)));
    }
    Ok(flowables)
}

/// Wrap `text` in `style` starting `x` points into the content area.
fn lines(text: &str, style: TextStyle, x: f32, ctx: &RenderContext<'_>) -> Vec<TextLine> {
    let text = ctx.normalizer.normalize_drawable(text);
    wrap_text(&text, style.font, style.size, ctx.width() - x)
        .into_iter()
        .map(|text| line(x, text, style))
        .collect()
}

/// Wrap with a leading mark and continuation lines aligned after it.
fn hanging(
    text: &str,
    mark: &str,
    style: TextStyle,
    indent: f32,
    ctx: &RenderContext<'_>,
) -> Vec<TextLine> {
    let mark_width = text_width(mark, style.font, style.size);
    let body_x = indent + mark_width;
    let mut out = lines(text, style, body_x, ctx);
    match out.first_mut() {
        Some(first) => {
            first.text = format!("{}{}", mark, first.text);
            first.x = indent;
        }
        None => out.push(line(indent, mark.trim_end().to_string(), style)),
    }
    out
}

fn line(x: f32, text: String, style: TextStyle) -> TextLine {
    TextLine {
        x,
        text,
        style,
        height: style.line_height(),
        baseline: style.ascent(),
        rule_below: None,
    }
}

/// Merge every text flow marked `keep_with_next` into the flowable after it:
/// appended to a following text flow, or carried as the lead of a raster.
fn keep_together(flowables: Vec<Flowable>) -> Vec<Flowable> {
    let mut out: Vec<Flowable> = Vec::with_capacity(flowables.len());
    let mut pending: Option<TextFlow> = None;

    for flowable in flowables {
        match flowable {
            Flowable::Text(mut flow) => {
                if let Some(mut head) = pending.take() {
                    head.lines.append(&mut flow.lines);
                    head.keep_with_next = flow.keep_with_next;
                    flow = head;
                }
                if flow.keep_with_next {
                    pending = Some(flow);
                } else {
                    out.push(Flowable::Text(flow));
                }
            }
            Flowable::Raster(mut raster) => {
                if let Some(head) = pending.take() {
                    raster.lead = head.lines;
                }
                out.push(Flowable::Raster(raster));
            }
        }
    }
    if let Some(head) = pending {
        out.push(Flowable::Text(head));
    }
    out
}
