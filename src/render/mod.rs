//! Rendering: section renderers, the pager, watermarks and output formats.

pub mod assemble;
mod json;
mod normalize;
mod options;
pub mod pdf;
mod result;
pub mod sections;
pub mod style;
mod text;
pub mod watermark;

pub use assemble::{apply_footers, footer_label, Assembler, Paginator, Stage};
pub use json::{to_json, JsonFormat};
pub use normalize::{encode_win_ansi, win_ansi_byte, TextNormalizer};
pub use options::{ExportOptions, DEFAULT_TITLE, DEFAULT_WATERMARK_TEXT};
pub use result::ExportStats;
pub use sections::{render_block, render_section, Flowable, RasterInfo, RenderContext};
pub use text::to_text;
pub use watermark::{LogoRef, Watermark};
