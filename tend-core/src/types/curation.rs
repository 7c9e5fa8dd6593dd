//! Curation recommendations: the single next step for an artifact.

use serde::{Deserialize, Serialize};

/// Recommended curation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurationAction {
    Archive,
    Merge,
    Refactor,
    PromoteGold,
    Update,
    Review,
    Delete,
    NoAction,
}

impl CurationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurationAction::Archive => "archive",
            CurationAction::Merge => "merge",
            CurationAction::Refactor => "refactor",
            CurationAction::PromoteGold => "promote_gold",
            CurationAction::Update => "update",
            CurationAction::Review => "review",
            CurationAction::Delete => "delete",
            CurationAction::NoAction => "no_action",
        }
    }
}

/// Recommendation priority. The derive order (High < Medium < Low) is the
/// sort order for final recommendation lists.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Estimated effort to carry out a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    Small,
    Medium,
    Large,
}

/// At most one top-level recommendation per artifact per curation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurationRecommendation {
    pub artifact_id: String,
    pub action: CurationAction,
    pub priority: Priority,
    pub reason: String,
    /// Confidence within [0, 1].
    pub confidence: f64,
    #[serde(default)]
    pub related_artifacts: Vec<String>,
    pub effort: Effort,
}
