//! Content model: the ordered sections an export is made of.
//!
//! [`build_sections`] turns a [`StrategicPlanData`](crate::model::StrategicPlanData)
//! into immutable [`Section`] values in canonical order. Sections know nothing
//! about pages; the renderers and the pager decide where their blocks land.

mod builder;

pub use builder::{build_sections, NOT_AVAILABLE, TO_BE_DEFINED};

use serde::{Deserialize, Serialize};

/// Section kinds in canonical document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Cover page
    Cover,
    /// Executive summary
    Summary,
    /// OGSM
    Ogsm,
    /// OKRs
    Okr,
    /// Balanced scorecard
    Bsc,
    /// Prioritization matrix
    Matrix,
    /// PESTEL analysis
    Pestel,
    /// 4DX execution plan
    Wbr,
    /// Objectives detail
    Objectives,
    /// AI insights
    Insights,
}

impl SectionKind {
    /// All kinds in canonical order.
    pub const ALL: [SectionKind; 10] = [
        SectionKind::Cover,
        SectionKind::Summary,
        SectionKind::Ogsm,
        SectionKind::Okr,
        SectionKind::Bsc,
        SectionKind::Matrix,
        SectionKind::Pestel,
        SectionKind::Wbr,
        SectionKind::Objectives,
        SectionKind::Insights,
    ];

    /// Human readable section title.
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Cover => "Capa",
            SectionKind::Summary => "Sumário Executivo",
            SectionKind::Ogsm => "OGSM",
            SectionKind::Okr => "OKRs",
            SectionKind::Bsc => "Balanced Scorecard",
            SectionKind::Matrix => "Matriz de Priorização",
            SectionKind::Pestel => "Análise PESTEL",
            SectionKind::Wbr => "Plano de Execução (4DX)",
            SectionKind::Objectives => "Objetivos Estratégicos",
            SectionKind::Insights => "Insights de IA",
        }
    }

    /// Parse the key used by chart references and the stored plan.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "cover" | "capa" => Some(SectionKind::Cover),
            "summary" | "sumario" => Some(SectionKind::Summary),
            "ogsm" => Some(SectionKind::Ogsm),
            "okr" | "okrs" => Some(SectionKind::Okr),
            "bsc" => Some(SectionKind::Bsc),
            "matrix" | "matriz" => Some(SectionKind::Matrix),
            "pestel" => Some(SectionKind::Pestel),
            "wbr" | "4dx" => Some(SectionKind::Wbr),
            "objectives" | "objetivos" => Some(SectionKind::Objectives),
            "insights" => Some(SectionKind::Insights),
            _ => None,
        }
    }
}

/// Heading level within a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingLevel {
    /// Section title
    Section,
    /// Sub-heading inside a section
    Sub,
}

/// Visual tone of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Regular body text
    #[default]
    Body,
    /// De-emphasized text
    Muted,
}

/// A first-level bullet with optional second-level children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletItem {
    /// Bullet text
    pub text: String,
    /// Second-level bullets
    pub children: Vec<String>,
}

impl BulletItem {
    /// Create a bullet without children.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Add a second-level bullet.
    pub fn with_child(mut self, child: impl Into<String>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// A typed unit of section content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A heading
    Heading {
        /// Heading text
        text: String,
        /// Heading level
        level: HeadingLevel,
    },

    /// A paragraph of wrapped text
    Paragraph {
        /// Paragraph text
        text: String,
        /// Visual tone
        tone: Tone,
    },

    /// A two-level bullet list
    BulletList {
        /// Items in order
        items: Vec<BulletItem>,
    },

    /// Labelled values
    KeyValue {
        /// `(label, value)` pairs in order
        pairs: Vec<(String, String)>,
    },

    /// An externally rendered region captured as a raster image
    RasterRegion {
        /// Region reference handed to the raster source
        region: String,
        /// Caption drawn below the image
        caption: Option<String>,
    },
}

impl ContentBlock {
    /// Create a heading block.
    pub fn heading(text: impl Into<String>, level: HeadingLevel) -> Self {
        ContentBlock::Heading {
            text: text.into(),
            level,
        }
    }

    /// Create a body paragraph.
    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentBlock::Paragraph {
            text: text.into(),
            tone: Tone::Body,
        }
    }

    /// Create a muted paragraph.
    pub fn muted(text: impl Into<String>) -> Self {
        ContentBlock::Paragraph {
            text: text.into(),
            tone: Tone::Muted,
        }
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, ContentBlock::Heading { .. })
    }

    /// Region reference if this block is a raster region.
    pub fn raster_region(&self) -> Option<&str> {
        match self {
            ContentBlock::RasterRegion { region, .. } => Some(region),
            _ => None,
        }
    }

    /// All text carried by the block, in reading order.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            ContentBlock::Heading { text, .. } | ContentBlock::Paragraph { text, .. } => {
                vec![text.as_str()]
            }
            ContentBlock::BulletList { items } => items
                .iter()
                .flat_map(|item| {
                    std::iter::once(item.text.as_str()).chain(item.children.iter().map(|c| c.as_str()))
                })
                .collect(),
            ContentBlock::KeyValue { pairs } => pairs
                .iter()
                .flat_map(|(k, v)| [k.as_str(), v.as_str()])
                .collect(),
            ContentBlock::RasterRegion { caption, .. } => caption.iter().map(|c| c.as_str()).collect(),
        }
    }
}

/// A titled, typed group of content blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section kind
    pub kind: SectionKind,
    /// Human readable title
    pub title: String,
    /// Blocks in order, headings first
    pub blocks: Vec<ContentBlock>,
}

impl Section {
    /// Create a section whose first block is its title heading.
    pub fn new(kind: SectionKind) -> Self {
        let title = kind.title().to_string();
        Self {
            kind,
            blocks: vec![ContentBlock::heading(title.clone(), HeadingLevel::Section)],
            title,
        }
    }

    /// Raster regions referenced by this section, in order.
    pub fn raster_regions(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(ContentBlock::raster_region)
    }
}
