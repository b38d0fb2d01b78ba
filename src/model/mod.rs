//! Data model types.
//!
//! `plan` holds the caller-supplied strategic planning graph; `document`,
//! `page` and `resource` form the paginated output representation that the
//! PDF writer serializes.

mod document;
mod page;
pub mod plan;
mod resource;

pub use document::{Document, Metadata};
pub use page::{Color, DrawOp, Font, Page};
pub use plan::{
    Bsc, BscPerspective, Cadence, ChartRef, Company, FieldValue, Initiative, InitiativeSummary,
    Insight, KeyResult, LeadMeasure, Metric, ObjectiveSummary, Ogsm, OgsmGoal, OgsmStrategy, Okr,
    Pestel, PriorityMatrix, Scoreboard, StrategicPlanData, Wbr,
};
pub use resource::{ImageId, RasterImage};
