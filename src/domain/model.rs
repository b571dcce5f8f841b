use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Server-imposed ceiling on how many project keys one measure search accepts.
pub const MAX_PROJECTS_PER_SEARCH: usize = 100;

/// Quality-gate status metric. Counted as pass/fail, never averaged.
pub const GATE_METRIC: &str = "alert_status";

/// `alert_status` value reported for a failed quality gate.
pub const GATE_FAILED: &str = "ERROR";

/// Metrics fetched when the caller does not name any.
pub const DEFAULT_METRICS: [&str; 13] = [
    "alert_status",
    "bugs",
    "reliability_rating",
    "vulnerabilities",
    "security_rating",
    "code_smells",
    "sqale_rating",
    "duplicated_lines_density",
    "coverage",
    "ncloc",
    "ncloc_language_distribution",
    "reliability_remediation_effort",
    "security_remediation_effort",
];

/// Metrics a portfolio aggregation is restricted to, regardless of what the
/// caller configured for plain measure fetches.
pub const AGGREGATED_METRICS: [&str; 4] = [
    "alert_status",
    "reliability_rating",
    "sqale_rating",
    "security_rating",
];

/// One project as listed by the component catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Paging metadata carried by every listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub page_index: u64,
    pub page_size: u64,
    pub total: u64,
}

impl Paging {
    /// The walk is over once the pages seen so far cover the reported total.
    pub fn is_last_page(&self) -> bool {
        self.page_index * self.page_size >= self.total
    }
}

/// One listing response: raw items plus the paging metadata that drives the
/// next request.
#[derive(Debug, Clone)]
pub struct Page {
    pub items: Vec<serde_json::Value>,
    pub paging: Paging,
}

/// Raw measure row from a multi-project measure search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureEntry {
    pub component: String,
    pub metric: String,
    #[serde(default)]
    pub value: String,
}

impl MeasureEntry {
    pub fn new(
        component: impl Into<String>,
        metric: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            metric: metric.into(),
            value: value.into(),
        }
    }
}

/// Typed measure value. The type is decided per metric name during
/// normalization, not inferred from the raw string alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasureValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl MeasureValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Decimal(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }
}

/// Per-project, per-metric measures. Keys are the projects the server
/// actually measured, which may be a subset of the requested keys.
pub type ProjectMeasureSet = HashMap<String, HashMap<String, MeasureValue>>;

/// Worst rating observed for one metric across a portfolio, with the number
/// of projects tied at that rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorstRating {
    pub value: i64,
    pub projects_count: usize,
}

impl Default for WorstRating {
    fn default() -> Self {
        // best possible rating, not yet seen on any project
        Self {
            value: 1,
            projects_count: 0,
        }
    }
}

/// Portfolio-level statistics reduced from per-project measures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Rounded average per metric. The quality-gate metric never appears here.
    pub ratings: HashMap<String, i64>,
    /// 1 (best) to 5 (worst); 0 when no project responded.
    pub releasability_rating: u8,
    pub projects_count_request: usize,
    pub projects_count_with_measures: usize,
    pub projects_failed_quality_gate: usize,
    pub worst_security_rating: WorstRating,
    pub worst_reliability_rating: WorstRating,
}

impl PortfolioSummary {
    /// Zero-value summary for an aggregation that received no measures at
    /// all. A value, not an error, so callers can tell "no data" apart from
    /// "request rejected".
    pub fn empty(requested_count: usize) -> Self {
        Self {
            projects_count_request: requested_count,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.projects_count_with_measures == 0
    }
}

/// One point of a metric's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Metric name to its history points, oldest first as the server returns them.
pub type MeasureHistory = HashMap<String, Vec<HistoryPoint>>;

/// User group as returned by group administration endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}
