//! Strategic planning input graph.
//!
//! These types mirror the records the planning product stores for a company.
//! Every sub-tree except `company` is optional and every list keeps the order
//! in which the caller supplied it. Multi-word keys are accepted both in
//! `snake_case` and `camelCase`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete input for one strategic plan export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategicPlanData {
    /// Company identity block
    pub company: Company,

    /// Objective, Goals, Strategies, Measures
    #[serde(default)]
    pub ogsm: Option<Ogsm>,

    /// Objectives and key results
    #[serde(default)]
    pub okrs: Option<Vec<Okr>>,

    /// Balanced scorecard
    #[serde(default)]
    pub bsc: Option<Bsc>,

    /// Prioritization matrix
    #[serde(default)]
    pub matriz: Option<PriorityMatrix>,

    /// External factor analysis
    #[serde(default)]
    pub pestel: Option<Pestel>,

    /// 4DX execution cadence
    #[serde(default)]
    pub wbr: Option<Wbr>,

    /// Objectives with initiatives and metrics
    #[serde(default)]
    pub objectives: Option<Vec<ObjectiveSummary>>,

    /// AI generated insights
    #[serde(default)]
    pub insights: Option<Vec<Insight>>,

    /// Externally rendered chart regions to embed
    #[serde(default)]
    pub charts: Vec<ChartRef>,
}

impl StrategicPlanData {
    /// Create plan data for a company with no optional sub-trees.
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company: Company::new(company_name),
            ..Default::default()
        }
    }

    /// Parse plan data from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Company identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Company {
    /// Company name
    pub name: String,

    /// Industry or sector
    #[serde(default)]
    pub sector: Option<String>,

    /// Mission statement
    #[serde(default)]
    pub mission: Option<String>,

    /// Vision statement
    #[serde(default)]
    pub vision: Option<String>,

    /// Company values
    #[serde(default)]
    pub values: Option<String>,
}

impl Company {
    /// Create a company with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// OGSM tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ogsm {
    /// Overarching objective
    #[serde(default)]
    pub objective: Option<String>,

    /// Goals in order
    #[serde(default)]
    pub goals: Vec<OgsmGoal>,
}

/// A goal with its strategies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OgsmGoal {
    /// Goal statement
    #[serde(default)]
    pub title: Option<String>,

    /// Strategies in order
    #[serde(default)]
    pub strategies: Vec<OgsmStrategy>,
}

/// A strategy with its measures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OgsmStrategy {
    /// Strategy statement
    #[serde(default)]
    pub title: Option<String>,

    /// Measures in order
    #[serde(default)]
    pub measures: Vec<String>,
}

/// An objective with key results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Okr {
    /// Qualitative objective
    #[serde(default)]
    pub objective: Option<String>,

    /// Key results in order
    #[serde(default, alias = "keyResults")]
    pub key_results: Vec<KeyResult>,
}

/// A measurable key result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyResult {
    /// Key result statement
    #[serde(default)]
    pub description: Option<String>,

    /// Target value
    #[serde(default)]
    pub target: Option<FieldValue>,

    /// Current value
    #[serde(default, alias = "currentValue")]
    pub current_value: Option<FieldValue>,
}

/// Balanced scorecard with its four perspectives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bsc {
    /// Financial perspective
    #[serde(default, alias = "financeira")]
    pub financial: BscPerspective,

    /// Customer perspective
    #[serde(default, alias = "clientes")]
    pub customer: BscPerspective,

    /// Internal process perspective
    #[serde(default, alias = "processos")]
    pub process: BscPerspective,

    /// Learning and growth perspective
    #[serde(default, alias = "aprendizado")]
    pub learning: BscPerspective,
}

/// One BSC perspective.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BscPerspective {
    /// Whether the plan covers this perspective
    #[serde(default)]
    pub covered: bool,

    /// Items in order
    #[serde(default)]
    pub items: Vec<String>,

    /// Improvement suggestion
    #[serde(default)]
    pub suggestion: Option<String>,
}

/// Prioritization matrix buckets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorityMatrix {
    /// High impact, low effort
    #[serde(default, alias = "quickWins")]
    pub quick_wins: Vec<InitiativeSummary>,

    /// High impact, high effort
    #[serde(default, alias = "majorProjects")]
    pub major_projects: Vec<InitiativeSummary>,

    /// Low impact, low effort
    #[serde(default, alias = "fillIns")]
    pub fill_ins: Vec<InitiativeSummary>,

    /// Low impact, high effort
    #[serde(default, alias = "thanklessTasks")]
    pub thankless_tasks: Vec<InitiativeSummary>,
}

/// A prioritized initiative with its precomputed scores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitiativeSummary {
    /// Initiative title
    #[serde(default)]
    pub title: Option<String>,

    /// Impact score
    #[serde(default)]
    pub impact: Option<FieldValue>,

    /// Effort score
    #[serde(default)]
    pub effort: Option<FieldValue>,

    /// Why the initiative landed in this bucket
    #[serde(default)]
    pub justification: Option<String>,
}

/// PESTEL factors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pestel {
    /// Political factors
    #[serde(default)]
    pub political: Option<String>,

    /// Economic factors
    #[serde(default)]
    pub economic: Option<String>,

    /// Social factors
    #[serde(default)]
    pub social: Option<String>,

    /// Technological factors
    #[serde(default)]
    pub technological: Option<String>,

    /// Environmental factors
    #[serde(default)]
    pub environmental: Option<String>,

    /// Legal factors
    #[serde(default)]
    pub legal: Option<String>,

    /// Expected impacts
    #[serde(default)]
    pub impacts: Option<Vec<String>>,

    /// Opportunities
    #[serde(default)]
    pub opportunities: Option<Vec<String>>,

    /// Threats
    #[serde(default)]
    pub threats: Option<Vec<String>>,
}

/// 4DX / weekly business review plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wbr {
    /// The single most crucial objective
    #[serde(default, alias = "mostCrucialObjective")]
    pub most_crucial_objective: Option<String>,

    /// Review cadence
    #[serde(default)]
    pub cadence: Option<Cadence>,

    /// Lead/lag scoreboard
    #[serde(default)]
    pub scoreboard: Option<Scoreboard>,
}

/// Recurring review meeting metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cadence {
    /// Meeting frequency (e.g. "semanal")
    #[serde(default)]
    pub frequency: Option<String>,

    /// Day of the week
    #[serde(default)]
    pub day: Option<String>,

    /// Time of day
    #[serde(default)]
    pub time: Option<String>,

    /// Participants in order
    #[serde(default)]
    pub participants: Vec<String>,
}

/// Lead/lag scoreboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Lag measure tracked by the scoreboard
    #[serde(default, alias = "lagMeasure")]
    pub lag_measure: Option<String>,

    /// Lead measures in order
    #[serde(default, alias = "leadMeasures")]
    pub lead_measures: Vec<LeadMeasure>,
}

/// A lead measure with its target and current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadMeasure {
    /// Measure name
    #[serde(default)]
    pub name: Option<String>,

    /// Target value
    #[serde(default)]
    pub target: Option<FieldValue>,

    /// Current value
    #[serde(default)]
    pub current: Option<FieldValue>,
}

/// An objective with nested initiatives and metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectiveSummary {
    /// Objective title
    #[serde(default)]
    pub title: Option<String>,

    /// Longer description
    #[serde(default)]
    pub description: Option<String>,

    /// Workflow status
    #[serde(default)]
    pub status: Option<String>,

    /// Completion percentage
    #[serde(default)]
    pub progress: Option<FieldValue>,

    /// Initiatives in order
    #[serde(default)]
    pub initiatives: Vec<Initiative>,

    /// Metrics in order
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

/// An initiative under an objective.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Initiative {
    /// Initiative title
    #[serde(default)]
    pub title: Option<String>,

    /// Workflow status (e.g. "ativo")
    #[serde(default)]
    pub status: Option<String>,

    /// Owner
    #[serde(default)]
    pub responsible: Option<String>,

    /// Due date as stored
    #[serde(default, alias = "dueDate")]
    pub due_date: Option<String>,
}

/// A tracked metric.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metric {
    /// Metric name
    #[serde(default)]
    pub name: Option<String>,

    /// Current value
    #[serde(default, alias = "currentValue")]
    pub current_value: Option<FieldValue>,

    /// Target value
    #[serde(default)]
    pub target: Option<FieldValue>,
}

/// An AI generated insight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Insight {
    /// Insight category (e.g. "risco", "oportunidade")
    #[serde(default, rename = "type", alias = "insight_type")]
    pub kind: Option<String>,

    /// Insight title
    #[serde(default)]
    pub title: Option<String>,

    /// Insight body
    #[serde(default)]
    pub description: Option<String>,

    /// Priority label
    #[serde(default)]
    pub priority: Option<String>,
}

/// Reference to an externally rendered chart region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRef {
    /// Section the chart belongs to (e.g. "bsc", "okr")
    pub section: String,

    /// Region reference handed to the raster source
    pub region: String,

    /// Caption rendered below the image
    #[serde(default)]
    pub caption: Option<String>,
}

/// A value stored either as a number or as free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric value
    Number(f64),
    /// Textual value
    Text(String),
}

impl FieldValue {
    /// Whether the value carries no information.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Number(n) => !n.is_finite(),
            FieldValue::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s.trim()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}
